/// Channel for non-fatal problems hit while rendering. The artifact is still
/// produced; the diagnostics sink decides where the warning goes.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, component: &str, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, component: &str, message: &str) {
        log::warn!(target: "chklst_reports", "[{}] {}", component, message);
    }
}
