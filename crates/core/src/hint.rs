use crate::is_pass;

/// First non-PASS candidate in server order; `None` means pass only, not an
/// error. No heuristic: the server owns legality and ordering.
pub fn pick(action_space: &[Vec<String>]) -> Option<&[String]> {
    action_space
        .iter()
        .find(|action| !is_pass(action))
        .map(Vec::as_slice)
}
