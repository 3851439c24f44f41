//! Browser control over the Chrome DevTools Protocol.
//!
//! With the `browser` feature, [`Browser`] launches Chromium through
//! chromiumoxide and hands out one [`ChromiumDriver`] per isolated browser
//! context, so tests never share cookies or storage. Without the feature
//! only the launch stub is compiled, which reports
//! [`ProbeError::BrowserNotFound`](crate::ProbeError::BrowserNotFound).

#[cfg(feature = "browser")]
#[allow(
    clippy::significant_drop_tightening,
    clippy::items_after_statements,
    clippy::similar_names
)]
mod cdp {
    use crate::context::{Cookie, SameSite, StorageState};
    use crate::driver::{Driver, DriverConfig, ElementSnapshot, Screenshot};
    use crate::locator::Locator;
    use crate::page::{Page, Timeouts};
    use crate::resolver::{invocation, ResolverArg, ResolverOp};
    use crate::result::{ProbeError, ProbeResult};
    use crate::wait::LoadState;
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
    use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
    use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
    use chromiumoxide::cdp::browser_protocol::network::{
        CookieParam, CookieSameSite, SetUserAgentOverrideParams, TimeSinceEpoch,
    };
    use chromiumoxide::cdp::browser_protocol::page::{
        AddScriptToEvaluateOnNewDocumentParams, CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::cdp::browser_protocol::target::{
        CloseTargetParams, CreateBrowserContextParams, CreateTargetParams,
    };
    use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
    use chromiumoxide::layout::Point;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::sync::Mutex;

    fn page_error(e: impl std::fmt::Display) -> ProbeError {
        ProbeError::PageError {
            message: e.to_string(),
        }
    }

    fn script_error(e: impl std::fmt::Display) -> ProbeError {
        ProbeError::ScriptError {
            message: e.to_string(),
        }
    }

    fn input_error(e: impl std::fmt::Display) -> ProbeError {
        ProbeError::InputError {
            message: e.to_string(),
        }
    }

    /// Browser instance with real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: DriverConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: DriverConfig) -> ProbeResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.executable_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ProbeError::BrowserLaunchError { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            tracing::info!(
                headless = config.headless,
                width = config.viewport_width,
                height = config.viewport_height,
                "browser launched"
            );

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a page in a fresh, isolated browser context
        ///
        /// # Errors
        ///
        /// Returns error if the context or page cannot be created
        pub async fn new_driver(&self) -> ProbeResult<ChromiumDriver> {
            let (page, context_id) = {
                let mut browser = self.inner.lock().await;
                let context_id = browser
                    .create_browser_context(CreateBrowserContextParams::default())
                    .await
                    .map_err(page_error)?;
                let target = CreateTargetParams::builder()
                    .url("about:blank")
                    .browser_context_id(context_id.clone())
                    .build()
                    .map_err(page_error)?;
                let page = browser.new_page(target).await.map_err(page_error)?;
                (page, context_id)
            };

            let metrics = SetDeviceMetricsOverrideParams::builder()
                .width(i64::from(self.config.viewport_width))
                .height(i64::from(self.config.viewport_height))
                .device_scale_factor(1.0)
                .mobile(false)
                .build()
                .map_err(page_error)?;
            page.execute(metrics).await.map_err(page_error)?;

            if let Some(ref ua) = self.config.user_agent {
                page.execute(SetUserAgentOverrideParams::new(ua.clone()))
                    .await
                    .map_err(page_error)?;
            }

            Ok(ChromiumDriver {
                page: Arc::new(Mutex::new(page)),
                browser: Arc::clone(&self.inner),
                context_id: Some(context_id),
                navigation_timeout: self.config.navigation_timeout,
                viewport: (self.config.viewport_width, self.config.viewport_height),
            })
        }

        /// Open a [`Page`] in a fresh context
        ///
        /// # Errors
        ///
        /// Returns error if the context or page cannot be created
        pub async fn new_page(&self, base_url: &str, timeouts: Timeouts) -> ProbeResult<Page> {
            let driver = self.new_driver().await?;
            Ok(Page::new(Arc::new(driver))
                .with_base_url(base_url)
                .with_timeouts(timeouts))
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &DriverConfig {
            &self.config
        }

        /// Close the browser
        ///
        /// # Errors
        ///
        /// Returns error if the browser refuses to close
        pub async fn close(self) -> ProbeResult<()> {
            {
                let mut browser = self.inner.lock().await;
                browser
                    .close()
                    .await
                    .map_err(|e| ProbeError::BrowserLaunchError {
                        message: e.to_string(),
                    })?;
                let _ = browser.wait().await;
            }
            self.handle.abort();
            tracing::debug!("browser closed");
            Ok(())
        }
    }

    #[derive(Debug, Deserialize)]
    struct ClickPoint {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Deserialize)]
    struct OriginDump {
        origin: String,
        items: Vec<(String, String)>,
    }

    /// [`Driver`] backed by one CDP page
    #[derive(Debug)]
    pub struct ChromiumDriver {
        page: Arc<Mutex<CdpPage>>,
        browser: Arc<Mutex<CdpBrowser>>,
        context_id: Option<BrowserContextId>,
        navigation_timeout: Duration,
        viewport: (u32, u32),
    }

    impl ChromiumDriver {
        async fn eval_value<T: DeserializeOwned>(&self, expression: String) -> ProbeResult<T> {
            let params = EvaluateParams::builder()
                .expression(expression)
                .return_by_value(true)
                .await_promise(true)
                .build()
                .map_err(script_error)?;
            let page = self.page.lock().await;
            let result = page.evaluate_expression(params).await.map_err(script_error)?;
            let value = result.value().cloned().unwrap_or(serde_json::Value::Null);
            serde_json::from_value(value).map_err(script_error)
        }

        async fn resolve<T: DeserializeOwned>(
            &self,
            locator: &Locator,
            op: ResolverOp,
            arg: &ResolverArg,
        ) -> ProbeResult<T> {
            self.eval_value(invocation(locator, op, arg)?).await
        }

        async fn point(&self, locator: &Locator, index: usize) -> ProbeResult<Point> {
            let point: Option<ClickPoint> = self
                .resolve(locator, ResolverOp::Point, &ResolverArg::at(index))
                .await?;
            point
                .map(|p| Point::new(p.x, p.y))
                .ok_or_else(|| ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                })
        }

        async fn expect_done(
            &self,
            locator: &Locator,
            op: ResolverOp,
            arg: &ResolverArg,
        ) -> ProbeResult<()> {
            let done: Option<bool> = self.resolve(locator, op, arg).await?;
            done.map(|_| ()).ok_or_else(|| ProbeError::ElementNotFound {
                locator: locator.to_string(),
            })
        }
    }

    fn to_cookie(c: &chromiumoxide::cdp::browser_protocol::network::Cookie) -> Cookie {
        let same_site = match c.same_site {
            Some(CookieSameSite::Strict) => SameSite::Strict,
            Some(CookieSameSite::None) => SameSite::None,
            _ => SameSite::Lax,
        };
        let mut cookie = Cookie::new(&c.name, &c.value, &c.domain)
            .with_path(&c.path)
            .with_expires(if c.session { -1.0 } else { c.expires })
            .with_same_site(same_site);
        cookie.http_only = c.http_only;
        cookie.secure = c.secure;
        cookie
    }

    fn to_cookie_param(c: &Cookie) -> ProbeResult<CookieParam> {
        let same_site = match c.same_site {
            SameSite::Strict => CookieSameSite::Strict,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::None => CookieSameSite::None,
        };
        let mut builder = CookieParam::builder()
            .name(c.name.clone())
            .value(c.value.clone())
            .domain(c.domain.clone())
            .path(c.path.clone())
            .http_only(c.http_only)
            .secure(c.secure)
            .same_site(same_site);
        if !c.is_session() {
            builder = builder.expires(TimeSinceEpoch::new(c.expires));
        }
        builder.build().map_err(|message| ProbeError::StorageState { message })
    }

    #[async_trait]
    impl Driver for ChromiumDriver {
        async fn navigate(&self, url: &str) -> ProbeResult<()> {
            let nav_error = |message: String| ProbeError::NavigationError {
                url: url.to_string(),
                message,
            };
            let page = self.page.lock().await;
            tokio::time::timeout(self.navigation_timeout, page.goto(url))
                .await
                .map_err(|_| {
                    nav_error(format!(
                        "timed out after {}ms",
                        self.navigation_timeout.as_millis()
                    ))
                })?
                .map_err(|e| nav_error(e.to_string()))?;
            tracing::debug!(url, "navigated");
            Ok(())
        }

        async fn current_url(&self) -> ProbeResult<String> {
            let page = self.page.lock().await;
            Ok(page.url().await.map_err(page_error)?.unwrap_or_default())
        }

        async fn wait_for_load_state(
            &self,
            state: LoadState,
            timeout: Duration,
        ) -> ProbeResult<()> {
            let start = Instant::now();
            loop {
                let ready: String = self.eval_value("document.readyState".to_string()).await?;
                if state.ready_states().contains(&ready.as_str()) {
                    return Ok(());
                }
                if start.elapsed() >= timeout {
                    return Err(ProbeError::timeout(
                        format!("load state {state}"),
                        timeout.as_millis() as u64,
                    ));
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }

        async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementSnapshot>> {
            self.resolve(locator, ResolverOp::Query, &ResolverArg::default())
                .await
        }

        async fn click(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
            let point = self.point(locator, index).await?;
            let page = self.page.lock().await;
            page.move_mouse(point).await.map_err(input_error)?;
            page.click(point).await.map_err(input_error)?;
            Ok(())
        }

        async fn hover(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
            let point = self.point(locator, index).await?;
            let page = self.page.lock().await;
            page.move_mouse(point).await.map_err(input_error)?;
            Ok(())
        }

        async fn fill(&self, locator: &Locator, index: usize, value: &str) -> ProbeResult<()> {
            self.expect_done(
                locator,
                ResolverOp::Fill,
                &ResolverArg::at(index).with_value(value),
            )
            .await
        }

        async fn focus(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
            self.expect_done(locator, ResolverOp::Focus, &ResolverArg::at(index))
                .await
        }

        async fn keyboard_type(&self, text: &str, delay: Duration) -> ProbeResult<()> {
            for ch in text.chars() {
                {
                    let page = self.page.lock().await;
                    page.execute(InsertTextParams::new(ch.to_string()))
                        .await
                        .map_err(input_error)?;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok(())
        }

        async fn evaluate(&self, script: &str) -> ProbeResult<serde_json::Value> {
            self.eval_value(script.to_string()).await
        }

        async fn screenshot(&self) -> ProbeResult<Screenshot> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let screenshot = page
                .execute(params)
                .await
                .map_err(|e| ProbeError::ScreenshotError {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            let data = base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| ProbeError::ScreenshotError {
                    message: e.to_string(),
                })?;
            Ok(Screenshot::new(data, self.viewport.0, self.viewport.1))
        }

        async fn storage_state(&self) -> ProbeResult<StorageState> {
            let cookies = {
                let page = self.page.lock().await;
                page.get_cookies().await.map_err(|e| ProbeError::StorageState {
                    message: e.to_string(),
                })?
            };
            let dump: OriginDump = self
                .eval_value(
                    "({ origin: location.origin, items: Object.entries(localStorage) })"
                        .to_string(),
                )
                .await?;

            let mut state = StorageState {
                cookies: cookies.iter().map(to_cookie).collect(),
                origins: Vec::new(),
            };
            for (name, value) in &dump.items {
                state.set_local_storage(&dump.origin, name, value);
            }
            Ok(state)
        }

        async fn apply_storage_state(&self, state: &StorageState) -> ProbeResult<()> {
            let params = state
                .cookies
                .iter()
                .map(to_cookie_param)
                .collect::<ProbeResult<Vec<_>>>()?;
            let page = self.page.lock().await;
            if !params.is_empty() {
                page.set_cookies(params)
                    .await
                    .map_err(|e| ProbeError::StorageState {
                        message: e.to_string(),
                    })?;
            }
            for origin in &state.origins {
                page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
                    origin.seed_script()?,
                ))
                .await
                .map_err(|e| ProbeError::StorageState {
                    message: e.to_string(),
                })?;
            }
            Ok(())
        }

        async fn close(&self) -> ProbeResult<()> {
            {
                let page = self.page.lock().await;
                page.execute(CloseTargetParams::new(page.target_id().clone()))
                    .await
                    .map_err(page_error)?;
            }
            if let Some(ref id) = self.context_id {
                let browser = self.browser.lock().await;
                browser
                    .dispose_browser_context(id.clone())
                    .await
                    .map_err(page_error)?;
            }
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, ChromiumDriver};

// ============================================================================
// Stub (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod stub {
    use crate::driver::DriverConfig;
    use crate::page::{Page, Timeouts};
    use crate::result::{ProbeError, ProbeResult};

    /// Browser placeholder; launching always fails without the `browser` feature
    #[derive(Debug)]
    pub struct Browser {
        config: DriverConfig,
    }

    impl Browser {
        /// Always fails with [`ProbeError::BrowserNotFound`]
        ///
        /// # Errors
        ///
        /// Always
        pub async fn launch(config: DriverConfig) -> ProbeResult<Self> {
            tracing::warn!(
                headless = config.headless,
                "built without the `browser` feature; no browser available"
            );
            Err(ProbeError::BrowserNotFound)
        }

        /// Always fails with [`ProbeError::BrowserNotFound`]
        ///
        /// # Errors
        ///
        /// Always
        pub async fn new_page(&self, _base_url: &str, _timeouts: Timeouts) -> ProbeResult<Page> {
            Err(ProbeError::BrowserNotFound)
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &DriverConfig {
            &self.config
        }

        /// Nothing to close
        ///
        /// # Errors
        ///
        /// Never
        pub async fn close(self) -> ProbeResult<()> {
            Ok(())
        }
    }
}

#[cfg(not(feature = "browser"))]
pub use stub::Browser;

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::driver::DriverConfig;
    use crate::result::ProbeError;

    #[tokio::test]
    async fn test_launch_without_feature_fails() {
        let err = Browser::launch(DriverConfig::default()).await.unwrap_err();
        assert!(matches!(err, ProbeError::BrowserNotFound));
    }
}
