/// Browser APIs the popup talks to, and their chrome.* implementation
use wasm_bindgen::prelude::*;

use crate::error::HostError;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn executeScript(code: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getSyncStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(key: &str, value: &str) -> Result<(), JsValue>;
}

/// Tab-level browser operations
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// URL of the active tab in the current window
    async fn active_tab_url(&self) -> Result<String, HostError>;

    /// Run `code` in the active tab's page
    async fn execute_script(&self, code: &str) -> Result<(), HostError>;

    async fn create_tab(&self, url: &str) -> Result<(), HostError>;
}

/// Flat string key/value storage synced across the user's devices
#[allow(async_fn_in_trait)]
pub trait SyncStore {
    async fn get(&self, key: &str) -> Result<Option<String>, HostError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), HostError>;
}

/// The real browser, reached through `popup.js`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

fn bridge_error(operation: &'static str) -> impl FnOnce(JsValue) -> HostError {
    move |e| HostError::Bridge {
        operation,
        message: format!("{:?}", e),
    }
}

impl TabHost for ChromeHost {
    async fn active_tab_url(&self) -> Result<String, HostError> {
        let url_js = getActiveTabUrl().await.map_err(bridge_error("tabs.query"))?;

        url_js.as_string().ok_or_else(|| HostError::Payload {
            operation: "tabs.query",
            message: format!("tab url is not a string: {:?}", url_js),
        })
    }

    async fn execute_script(&self, code: &str) -> Result<(), HostError> {
        executeScript(code).await.map_err(bridge_error("tabs.executeScript"))
    }

    async fn create_tab(&self, url: &str) -> Result<(), HostError> {
        createTab(url).await.map_err(bridge_error("tabs.create"))
    }
}

impl SyncStore for ChromeHost {
    async fn get(&self, key: &str) -> Result<Option<String>, HostError> {
        let value_js = getSyncStorage(key)
            .await
            .map_err(bridge_error("storage.sync.get"))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js).map_err(|e| HostError::Payload {
            operation: "storage.sync.get",
            message: format!("{:?}", e),
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), HostError> {
        setSyncStorage(key, value)
            .await
            .map_err(bridge_error("storage.sync.set"))
    }
}

/// In-memory stand-ins for the browser used by unit tests
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    fn failed(operation: &'static str) -> HostError {
        HostError::Bridge {
            operation,
            message: "unavailable".to_string(),
        }
    }

    #[derive(Default)]
    pub struct FakeTabs {
        pub active_url: Option<String>,
        pub scripts: RefCell<Vec<String>>,
        pub opened: RefCell<Vec<String>>,
        pub fail_scripts: bool,
    }

    impl FakeTabs {
        pub fn on(url: &str) -> Self {
            FakeTabs {
                active_url: Some(url.to_string()),
                ..FakeTabs::default()
            }
        }
    }

    impl TabHost for FakeTabs {
        async fn active_tab_url(&self) -> Result<String, HostError> {
            self.active_url.clone().ok_or_else(|| failed("tabs.query"))
        }

        async fn execute_script(&self, code: &str) -> Result<(), HostError> {
            if self.fail_scripts {
                return Err(failed("tabs.executeScript"));
            }
            self.scripts.borrow_mut().push(code.to_string());
            Ok(())
        }

        async fn create_tab(&self, url: &str) -> Result<(), HostError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemoryStore {
        pub items: RefCell<HashMap<String, String>>,
        pub fail: bool,
    }

    impl SyncStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, HostError> {
            if self.fail {
                return Err(failed("storage.sync.get"));
            }
            Ok(self.items.borrow().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), HostError> {
            if self.fail {
                return Err(failed("storage.sync.set"));
            }
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
