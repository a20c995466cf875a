//! Watch command — poll the time-scale array until Ctrl-C.

use anyhow::Result;

#[cfg(target_os = "windows")]
pub fn run(process_name: &str, interval_ms: u64) -> Result<()> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use anyhow::bail;
    use tether_core::{ProcessMemory, TimeScaleRegistry};
    use tracing::info;

    let Some(memory) = ProcessMemory::open_by_name(process_name)? else {
        bail!("no running process named {process_name:?}");
    };

    let mut time_scale = TimeScaleRegistry::new();
    time_scale.init(&memory, memory.module_range())?;
    info!("time-scale array at {}", time_scale.base()?);

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        match (time_scale.requested(&memory), time_scale.effective(&memory)) {
            (Ok(requested), Ok(effective)) => {
                println!("requested {requested:.3}  effective {effective:.3}");
            }
            (Err(e), _) | (_, Err(e)) => {
                info!("read failed ({e}); process probably exited");
                break;
            }
        }
        thread::sleep(Duration::from_millis(interval_ms));
    }

    Ok(())
}

#[cfg(not(target_os = "windows"))]
pub fn run(_process_name: &str, _interval_ms: u64) -> Result<()> {
    anyhow::bail!("process watching is only supported on Windows")
}
