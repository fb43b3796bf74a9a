//! Process-scoped configuration context
//!
//! Holds one shared [`TreeStore`] for code that does not want to thread a
//! store handle through every call. Initialization is explicit: call
//! [`init`], [`init_from_env`] or [`install`] once at startup. Using any
//! getter first returns [`ArborError::NotInitialized`].
//!
//! ```rust,no_run
//! use arbor::context;
//!
//! # async fn example() -> arbor::domain::Result<()> {
//! context::init_from_env().await?;
//! let host = context::string("db.host", Some("localhost"))?;
//! let workers = context::int("server.workers", Some("4"))?;
//! # Ok(())
//! # }
//! ```

use crate::adapters::factory::{load_store, ProviderSpec};
use crate::binder::Bindable;
use crate::config::schema::ArborSettings;
use crate::domain::errors::ArborError;
use crate::domain::Result;
use crate::store::TreeStore;
use parking_lot::RwLock;

static CONTEXT: RwLock<Option<TreeStore>> = parking_lot::const_rwlock(None);

/// Install an already-loaded store
///
/// # Errors
///
/// Returns `ArborError::Configuration` if a store is already installed; call
/// [`reset`] first to replace it.
pub fn install(store: TreeStore) -> Result<()> {
    let mut slot = CONTEXT.write();
    if slot.is_some() {
        return Err(ArborError::Configuration(
            "configuration context is already initialized".to_string(),
        ));
    }
    *slot = Some(store);
    tracing::debug!("Configuration context installed");
    Ok(())
}

/// Load a store from `provider` (`<scheme>::<context>`) and install it
pub async fn init(provider: &str) -> Result<()> {
    init_with(provider, &ArborSettings::default()).await
}

/// Like [`init`], using `settings` for overlay and remote timeouts
pub async fn init_with(provider: &str, settings: &ArborSettings) -> Result<()> {
    if is_initialized() {
        return Err(ArborError::Configuration(
            "configuration context is already initialized".to_string(),
        ));
    }
    let store = load_store(provider, settings).await?;
    install(store)
}

/// Load from the provider named by `GLOBAL_CONF`, or the default file provider
pub async fn init_from_env() -> Result<()> {
    let spec = ProviderSpec::from_env()?;
    init(&spec.to_string()).await
}

pub fn is_initialized() -> bool {
    CONTEXT.read().is_some()
}

/// Handle to the installed store
///
/// The handle shares state with the context, so writes through it are visible
/// to every other reader.
pub fn store() -> Result<TreeStore> {
    CONTEXT.read().clone().ok_or(ArborError::NotInitialized)
}

/// Drop the installed store
pub fn reset() {
    if CONTEXT.write().take().is_some() {
        tracing::debug!("Configuration context reset");
    }
}

pub fn string(key: &str, default: Option<&str>) -> Result<String> {
    Ok(store()?.get_string(key, default)?)
}

pub fn bool(key: &str, default: Option<&str>) -> Result<bool> {
    Ok(store()?.get_bool(key, default)?)
}

pub fn int(key: &str, default: Option<&str>) -> Result<i32> {
    Ok(store()?.get_i32(key, default)?)
}

pub fn int64(key: &str, default: Option<&str>) -> Result<i64> {
    Ok(store()?.get_i64(key, default)?)
}

pub fn float32(key: &str, default: Option<&str>) -> Result<f32> {
    Ok(store()?.get_f32(key, default)?)
}

pub fn float64(key: &str, default: Option<&str>) -> Result<f64> {
    Ok(store()?.get_f64(key, default)?)
}

pub fn strings(key: &str, default: Option<&str>) -> Result<Vec<String>> {
    Ok(store()?.get_strings(key, default)?)
}

pub fn bools(key: &str, default: Option<&str>) -> Result<Vec<bool>> {
    Ok(store()?.get_bools(key, default)?)
}

pub fn ints(key: &str, default: Option<&str>) -> Result<Vec<i32>> {
    Ok(store()?.get_i32s(key, default)?)
}

pub fn int64s(key: &str, default: Option<&str>) -> Result<Vec<i64>> {
    Ok(store()?.get_i64s(key, default)?)
}

pub fn float32s(key: &str, default: Option<&str>) -> Result<Vec<f32>> {
    Ok(store()?.get_f32s(key, default)?)
}

pub fn float64s(key: &str, default: Option<&str>) -> Result<Vec<f64>> {
    Ok(store()?.get_f64s(key, default)?)
}

/// Populate `target` from the installed store
pub fn bind<T: Bindable + ?Sized>(target: &mut T) -> Result<()> {
    Ok(store()?.bind(target)?)
}
