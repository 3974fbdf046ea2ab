//! Browser launch options and capability construction.
//!
//! Provides a type-safe interface for configuring remote browser sessions:
//! headless mode, GPU usage, window size, and additional command-line
//! arguments, rendered as a W3C capabilities payload.
//!
//! # Example
//!
//! ```
//! use browser_pool::SessionOptions;
//!
//! let options = SessionOptions::new()
//!     .with_headless()
//!     .with_window_size(1920, 1080);
//!
//! let args = options.to_args();
//! // ["--headless", "--window-size=1920,1080"]
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, json};

// ============================================================================
// Constants
// ============================================================================

/// Default browser name advertised in capabilities.
const DEFAULT_BROWSER_NAME: &str = "chrome";

// ============================================================================
// SessionOptions
// ============================================================================

/// Remote browser session configuration options.
///
/// Controls how the remote end launches the browser for a session, including
/// display mode, window dimensions, and additional command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Browser name advertised in capabilities.
    pub browser_name: String,

    /// Run the browser without a GUI (headless mode).
    pub headless: bool,

    /// Disable GPU acceleration.
    pub disable_gpu: bool,

    /// Disable the browser sandbox. Needed when the remote end runs as root.
    pub no_sandbox: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionOptions {
    /// Creates a new options instance with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            browser_name: DEFAULT_BROWSER_NAME.to_string(),
            headless: false,
            disable_gpu: false,
            no_sandbox: false,
            window_size: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates options configured for a restricted environment.
    ///
    /// Restricted environments (CI hosts, production containers) have no
    /// display or GPU, so the session runs headless with GPU acceleration
    /// disabled. The sandbox stays enabled; opt out with
    /// [`with_no_sandbox`](Self::with_no_sandbox) when running as root.
    #[inline]
    #[must_use]
    pub fn restricted() -> Self {
        Self::new().with_headless().with_disable_gpu()
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionOptions {
    /// Sets the browser name advertised in capabilities.
    #[inline]
    #[must_use]
    pub fn with_browser_name(mut self, name: impl Into<String>) -> Self {
        self.browser_name = name.into();
        self
    }

    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Disables GPU acceleration.
    #[inline]
    #[must_use]
    pub fn with_disable_gpu(mut self) -> Self {
        self.disable_gpu = true;
        self
    }

    /// Disables the browser sandbox.
    #[inline]
    #[must_use]
    pub fn with_no_sandbox(mut self) -> Self {
        self.no_sandbox = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl SessionOptions {
    /// Converts options to browser command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4 + self.extra_args.len());

        if self.headless {
            args.push("--headless".to_string());
        }

        if self.disable_gpu {
            args.push("--disable-gpu".to_string());
        }

        if self.no_sandbox {
            args.push("--no-sandbox".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={width},{height}"));
        }

        args.extend(self.extra_args.clone());
        args
    }

    /// Renders the options as a W3C capabilities payload.
    ///
    /// Launch arguments land in the vendor options section keyed by the
    /// browser name.
    #[must_use]
    pub fn to_capabilities(&self) -> Value {
        let mut always_match = serde_json::Map::new();
        always_match.insert(
            "browserName".to_string(),
            Value::String(self.browser_name.clone()),
        );
        always_match.insert(
            format!("goog:{}Options", self.browser_name),
            json!({ "args": self.to_args() }),
        );

        json!({
            "capabilities": {
                "alwaysMatch": always_match,
            },
        })
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.browser_name.is_empty() {
            return Err("Browser name must not be empty".to_string());
        }
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================
