use crate::message::StatusCode;

/// Compares two non-2xx status codes for best-response election.
///
/// Returns `Ordering::Greater` iff `a` is the better (more preferred)
/// response to forward upstream. Ranking: `487` beats everything; `408`
/// loses to everything except itself; otherwise the numerically higher code
/// wins.
///
/// RFC 3261 §16.7 actually prefers 6xx responses above all else; the system
/// this core is modeled on does not implement that preference, ranking by
/// raw numeric value instead. That behavior is preserved here rather than
/// corrected, since role-specific proxies built on this core may already
/// depend on it.
pub fn compare_sip_sc(a: StatusCode, b: StatusCode) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let a = a.into_i32();
    let b = b.into_i32();

    if a == b {
        return Ordering::Equal;
    }
    if a == 487 {
        return Ordering::Greater;
    }
    if b == 487 {
        return Ordering::Less;
    }
    if a == 408 {
        return Ordering::Less;
    }
    if b == 408 {
        return Ordering::Greater;
    }
    // Higher numeric status wins.
    a.cmp(&b)
}

/// Returns `true` if `candidate` should replace `current` as the UAS's best
/// buffered response.
pub fn is_better(candidate: StatusCode, current: StatusCode) -> bool {
    compare_sip_sc(candidate, current) == std::cmp::Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_terminated_beats_everything() {
        assert!(is_better(StatusCode::RequestTerminated, StatusCode::BusyHere));
        assert!(is_better(StatusCode::RequestTerminated, StatusCode::RequestTimeout));
        assert!(!is_better(StatusCode::BusyHere, StatusCode::RequestTerminated));
    }

    #[test]
    fn request_timeout_is_worst() {
        assert!(!is_better(StatusCode::RequestTimeout, StatusCode::NotFound));
        assert!(is_better(StatusCode::NotFound, StatusCode::RequestTimeout));
    }

    #[test]
    fn otherwise_higher_numeric_wins() {
        assert!(is_better(StatusCode::BusyHere, StatusCode::NotFound));
        assert!(!is_better(StatusCode::NotFound, StatusCode::BusyHere));
    }

    #[test]
    fn all_fail_election_picks_busy_here() {
        let responses = [StatusCode::NotFound, StatusCode::BusyHere, StatusCode::RequestTimeout];
        let mut best = responses[0];
        for &r in &responses[1..] {
            if is_better(r, best) {
                best = r;
            }
        }
        assert_eq!(best, StatusCode::BusyHere);
    }
}
