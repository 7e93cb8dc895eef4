//! Command execution helpers
//!
//! Every command runs through [`execute_logged`] so its duration and outcome
//! are logged the same way.

use std::future::Future;
use std::time::Instant;

use opsboard_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Run a command future, then log `command_execution_success` or
/// `command_execution_failure` with its duration.
///
/// # Example
///
/// ```rust,ignore
/// execute_logged("records::delete", domain.as_str(), async {
///     resource.delete(&actor, &id).await
/// })
/// .await
/// ```
pub async fn execute_logged<Fut, T>(command: &str, domain: &str, command_fn: Fut) -> DomainResult<T>
where
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn.await;

    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command, domain, start.elapsed(), error_type);

    result
}

#[cfg(test)]
mod tests {
    use opsboard_domain::OpsBoardError;

    use super::*;

    #[tokio::test]
    async fn passes_results_through() {
        let ok = execute_logged("test::ok", "-", async { Ok::<_, OpsBoardError>(7) }).await;
        assert_eq!(ok, Ok(7));

        let err = execute_logged("test::err", "-", async {
            Err::<u8, _>(OpsBoardError::Auth("not signed in".into()))
        })
        .await;
        assert_eq!(err, Err(OpsBoardError::Auth("not signed in".into())));
    }
}
