/// Lifecycle of one discovery attempt.
///
/// `idle → discovering → {accepted | rejected | failed}`. Exactly one
/// terminal state is reached per attempt.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DiscoveryState {
    Idle,
    Discovering,
    Accepted,
    Rejected,
    Failed,
}
