//! SDK error categorization for the sweep's skip-or-fail decisions.
//!
//! The AWS SDK retries transient errors internally with exponential
//! backoff; the sweep adds no retry layer of its own. What it does
//! need is to tell apart (a) errors worth surfacing, (b) errors that
//! just mean "skip this resource", and (c) two S3 quirks the tagging
//! workflow leans on: `NoSuchTagSet` (a bucket with no tag set reads
//! as "no tags") and `OperationAborted` (a concurrent bucket-tagging
//! conflict that the backfill counts as success).

use anyhow::Error;

/// Coarse category of an SDK failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkErrorKind {
    /// Rate limiting; the SDK already backed off and gave up.
    Throttled,
    /// Network or endpoint trouble.
    Network,
    /// Caller lacks permission for the operation.
    AccessDenied,
    /// The resource in the request does not exist (stale CSV row,
    /// deleted resource, malformed identifier).
    NotFound,
    /// Anything else.
    Other,
}

/// Categorize an error by its message. The SDK's typed errors are
/// per-crate (29 crates here), so the dispatch layer works from the
/// rendered message the way the original tooling matched on
/// `ClientError` strings.
pub fn categorize(err: &Error) -> SdkErrorKind {
    categorize_str(&format!("{:#}", err))
}

pub fn categorize_str(msg: &str) -> SdkErrorKind {
    if msg.contains("ThrottlingException")
        || msg.contains("Throttling")
        || msg.contains("TooManyRequestsException")
        || msg.contains("RequestLimitExceeded")
        || msg.contains("RateExceeded")
    {
        return SdkErrorKind::Throttled;
    }
    if msg.contains("DispatchFailure")
        || msg.contains("connection")
        || msg.contains("timed out")
        || msg.contains("timeout")
    {
        return SdkErrorKind::Network;
    }
    if msg.contains("AccessDenied")
        || msg.contains("UnauthorizedOperation")
        || msg.contains("AuthFailure")
        || msg.contains("not authorized")
    {
        return SdkErrorKind::AccessDenied;
    }
    if msg.contains("NotFound")
        || msg.contains("NoSuchEntity")
        || msg.contains("ResourceNotFoundException")
        || msg.contains("does not exist")
    {
        return SdkErrorKind::NotFound;
    }
    SdkErrorKind::Other
}

/// S3 returns `NoSuchTagSet` when a bucket has never been tagged.
/// For the audit that is a perfectly good answer: the bucket has no
/// tags.
pub fn is_no_such_tag_set(err: &Error) -> bool {
    format!("{:#}", err).contains("NoSuchTagSet")
}

/// S3 `PutBucketTagging` fails with `OperationAborted` when another
/// tagging change is in flight on the same bucket. The original
/// tooling treats this as success on the backfill path.
pub fn is_operation_aborted(err: &Error) -> bool {
    format!("{:#}", err).contains("OperationAborted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_throttling() {
        assert_eq!(
            categorize_str("ThrottlingException: Rate exceeded"),
            SdkErrorKind::Throttled
        );
        assert_eq!(
            categorize_str("TooManyRequestsException: slow down"),
            SdkErrorKind::Throttled
        );
    }

    #[test]
    fn test_categorize_network() {
        assert_eq!(
            categorize_str("DispatchFailure: connection refused"),
            SdkErrorKind::Network
        );
    }

    #[test]
    fn test_categorize_access_denied() {
        assert_eq!(
            categorize_str("AccessDeniedException: User is not authorized to perform kms:ListResourceTags"),
            SdkErrorKind::AccessDenied
        );
    }

    #[test]
    fn test_categorize_not_found() {
        assert_eq!(
            categorize_str("ResourceNotFoundException: Requested resource not found"),
            SdkErrorKind::NotFound
        );
        assert_eq!(
            categorize_str("The specified log group does not exist"),
            SdkErrorKind::NotFound
        );
    }

    #[test]
    fn test_categorize_other() {
        assert_eq!(
            categorize_str("ValidationException: Invalid parameter"),
            SdkErrorKind::Other
        );
    }

    #[test]
    fn test_s3_quirks() {
        let no_tags = anyhow::anyhow!("NoSuchTagSet: The TagSet does not exist");
        assert!(is_no_such_tag_set(&no_tags));
        assert!(!is_operation_aborted(&no_tags));

        let aborted = anyhow::anyhow!(
            "OperationAborted: A conflicting conditional operation is currently in progress"
        );
        assert!(is_operation_aborted(&aborted));
        assert!(!is_no_such_tag_set(&aborted));
    }
}
