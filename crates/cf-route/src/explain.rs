//! Line-oriented sinks for [`RoutePlanner::explain_plan`][crate::RoutePlanner::explain_plan].

/// Receives one human-readable line per replayed transition.
pub trait PlanLogger {
    fn line(&mut self, line: &str);
}

/// Collects lines, mostly for tests and CLI tools that print them later.
impl PlanLogger for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

/// Emits each line as a `tracing` `DEBUG` event under the `cf_route::explain`
/// target.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingLogger;

impl PlanLogger for TracingLogger {
    fn line(&mut self, line: &str) {
        tracing::debug!(target: "cf_route::explain", "{line}");
    }
}
