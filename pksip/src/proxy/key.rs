use crate::message::Request;

const BRANCH_MAGIC_COOKIE: &str = "z9hG4bK";

/// Generates a fresh RFC 3261 branch parameter.
pub fn generate_branch() -> String {
    format!("{BRANCH_MAGIC_COOKIE}{}", uuid::Uuid::new_v4().simple())
}

/// Identifies a transaction by its top `Via` branch, independent of method —
/// a CANCEL shares its matching INVITE's branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionKey(String);

impl TransactionKey {
    /// Builds a key from a raw branch parameter.
    pub fn from_branch(branch: &str) -> Self {
        TransactionKey(branch.to_ascii_lowercase())
    }

    /// Builds the key an inbound request would be matched under, from its
    /// top `Via` header.
    pub fn for_request(request: &Request) -> Option<Self> {
        request.headers.top_via().map(|via| Self::from_branch(&via.branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::mock::test_request;
    use crate::message::SipMethod;

    #[test]
    fn branch_match_is_case_insensitive() {
        let lower = TransactionKey::from_branch("z9hg4bk-abc123");
        let upper = TransactionKey::from_branch("Z9HG4BK-ABC123");
        assert_eq!(lower, upper);
    }

    #[test]
    fn cancel_shares_its_invites_branch() {
        let mut invite = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        invite.headers.via[0].branch = "z9hG4bK-shared".to_owned();
        let mut cancel = invite.clone();
        cancel.method = SipMethod::Cancel;

        assert_eq!(TransactionKey::for_request(&invite), TransactionKey::for_request(&cancel));
    }

    #[test]
    fn request_with_no_via_has_no_key() {
        let mut request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        request.headers.via.clear();
        assert!(TransactionKey::for_request(&request).is_none());
    }
}
