//! Scan command — run both registry passes against a live process.

use anyhow::Result;

#[cfg(target_os = "windows")]
pub fn run(process_name: &str) -> Result<()> {
    use anyhow::bail;
    use tether_core::{HandlingRegistry, ProcessMemory, TimeScaleRegistry};
    use tracing::info;

    let Some(memory) = ProcessMemory::open_by_name(process_name)? else {
        bail!("no running process named {process_name:?}");
    };
    let module = memory.module_range();
    info!(
        "attached to {process_name} (pid {}, module {} + {:#x})",
        memory.pid(),
        module.start,
        module.len
    );

    let mut handling = HandlingRegistry::new();
    match handling.init(&memory, module) {
        Ok(()) => println!("handling pointer offset: {:#x}", handling.offset()?),
        Err(e) => println!("handling pointer offset: unresolved ({e})"),
    }

    let mut time_scale = TimeScaleRegistry::new();
    match time_scale.init(&memory, module) {
        Ok(()) => {
            println!("time-scale array base:   {}", time_scale.base()?);
            println!("  requested: {:.3}", time_scale.requested(&memory)?);
            println!("  effective: {:.3}", time_scale.effective(&memory)?);
        }
        Err(e) => println!("time-scale array base:   unresolved ({e})"),
    }

    Ok(())
}

#[cfg(not(target_os = "windows"))]
pub fn run(_process_name: &str) -> Result<()> {
    anyhow::bail!("process scanning is only supported on Windows")
}
