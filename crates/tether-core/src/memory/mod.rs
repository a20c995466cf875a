mod address;
pub mod layout;
#[cfg(target_os = "windows")]
mod process;
mod view;

// Mock memory is always available so downstream crates can test against it.
#[doc(hidden)]
pub mod mock;

pub use address::{Address, MemoryRange};
#[cfg(target_os = "windows")]
pub use process::ProcessMemory;
pub use view::MemoryView;

#[doc(hidden)]
pub use mock::{MockMemory, MockMemoryBuilder, MockWriter};
