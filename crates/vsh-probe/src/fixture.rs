//! Test fixtures.
//!
//! A fixture is a reusable precondition built against a [`Page`]: it is set
//! up before a test body runs and torn down afterwards, whether the body
//! passed or not.

use crate::page::Page;
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Trait for test fixtures that can be set up and torn down.
///
/// # Example
///
/// ```ignore
/// struct SignedOut { landing: LandingPage }
///
/// #[async_trait]
/// impl Fixture for SignedOut {
///     async fn setup(page: &Page) -> ProbeResult<Self> {
///         let landing = LandingPage::new(page.clone());
///         landing.open().await?;
///         Ok(Self { landing })
///     }
/// }
/// ```
#[async_trait]
pub trait Fixture: Sized + Send + Sync {
    /// Build the fixture against `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if setup fails; the test body is then not run.
    async fn setup(page: &Page) -> ProbeResult<Self>;

    /// Release whatever setup acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if teardown fails.
    async fn teardown(self) -> ProbeResult<()> {
        Ok(())
    }

    /// Fixture name for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Set up `F`, run `body` against it, then tear it down.
///
/// Teardown runs even when the body fails. When both fail the body's error
/// is returned and the teardown error is logged.
///
/// # Errors
///
/// Returns a [`ProbeError::FixtureError`] if setup fails, otherwise the
/// body's error, otherwise the teardown error.
pub async fn with_fixture<F, T, B>(page: &Page, body: B) -> ProbeResult<T>
where
    F: Fixture,
    B: for<'f> FnOnce(&'f F) -> BoxFuture<'f, ProbeResult<T>>,
{
    let fixture = F::setup(page).await.map_err(|err| ProbeError::FixtureError {
        message: format!("{} setup failed: {err}", std::any::type_name::<F>()),
    })?;
    tracing::debug!(fixture = fixture.name(), "fixture ready");

    let outcome = body(&fixture).await;
    let name = fixture.name().to_string();
    let teardown = fixture.teardown().await;

    match (outcome, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(ProbeError::FixtureError {
            message: format!("{name} teardown failed: {err}"),
        }),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(teardown_err)) => {
            tracing::warn!(fixture = %name, error = %teardown_err, "teardown failed after test error");
            Err(err)
        }
    }
}
