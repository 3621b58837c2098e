use std::sync::Arc;

use marrow_solver::termination::StopFlag;

/// Raise `stop` when the process receives SIGINT or SIGTERM.
pub(crate) fn install(stop: &StopFlag) -> std::io::Result<()> {
    // The signals to listen to for termination.
    const TERMINATION_SIGNALS: &[std::ffi::c_int] =
        &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

    let raised = stop.shared();
    for &signal in TERMINATION_SIGNALS {
        let _ = signal_hook::flag::register(signal, Arc::clone(&raised))?;
    }

    Ok(())
}
