use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use gloo_storage::Storage as GlooStorage;
use ::log::{error, warn};
use stride_domain as domain;
use stride_web_app::{Config, ConfigRepository, log};

use crate::rest;

const KEY_ACCESS_TOKEN: &str = "accessToken";
const KEY_REFRESH_TOKEN: &str = "refreshToken";
const KEY_USER: &str = "user";
const KEY_REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";
const KEY_CONFIG: &str = "config";
const KEY_LOG: &str = "log";

/// Origin-scoped string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn delete(&self, key: &str);
}

/// The browser's `localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .ok()
            .flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| format!("{err:?}"))
    }

    fn delete(&self, key: &str) {
        gloo_storage::LocalStorage::delete(key);
    }
}

/// Store that lives as long as the page. Clones share their content.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// Session persisted in a [`KeyValueStore`].
#[derive(Debug, Default, Clone)]
pub struct TokenStore<K> {
    store: K,
}

impl<K> TokenStore<K> {
    pub const fn new(store: K) -> Self {
        Self { store }
    }
}

impl<K: KeyValueStore> TokenStore<K> {
    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), domain::StorageError> {
        self.store
            .set(key, value)
            .map_err(|message| domain::StorageError::Write {
                key: key.to_string(),
                message,
            })
    }
}

impl<K: KeyValueStore> domain::TokenRepository for TokenStore<K> {
    fn read_access_token(&self) -> Option<domain::AccessToken> {
        self.read(KEY_ACCESS_TOKEN).map(Into::into)
    }

    fn read_refresh_token(&self) -> Option<domain::RefreshToken> {
        self.read(KEY_REFRESH_TOKEN).map(Into::into)
    }

    fn write_tokens(&self, tokens: &domain::Tokens) -> Result<(), domain::StorageError> {
        let previous = self.store.get(KEY_ACCESS_TOKEN);
        self.write(KEY_ACCESS_TOKEN, tokens.access.as_str())?;
        if let Err(err) = self.write(KEY_REFRESH_TOKEN, tokens.refresh.as_str()) {
            match previous {
                Some(previous) => {
                    if let Err(message) = self.store.set(KEY_ACCESS_TOKEN, &previous) {
                        error!("failed to restore access token: {message}");
                        self.store.delete(KEY_ACCESS_TOKEN);
                        self.store.delete(KEY_REFRESH_TOKEN);
                    }
                }
                None => self.store.delete(KEY_ACCESS_TOKEN),
            }
            return Err(err);
        }
        Ok(())
    }

    fn read_user(&self) -> Option<domain::User> {
        let value = self.read(KEY_USER)?;
        match serde_json::from_str::<rest::User>(&value) {
            Ok(user) => Some(user.into()),
            Err(err) => {
                warn!("ignoring malformed user record: {err}");
                None
            }
        }
    }

    fn write_user(&self, user: &domain::User) -> Result<(), domain::StorageError> {
        let value = serde_json::to_string(&rest::User::from(user)).map_err(|err| {
            domain::StorageError::Write {
                key: KEY_USER.to_string(),
                message: err.to_string(),
            }
        })?;
        self.write(KEY_USER, &value)
    }

    fn clear(&self) {
        self.store.delete(KEY_ACCESS_TOKEN);
        self.store.delete(KEY_REFRESH_TOKEN);
        self.store.delete(KEY_USER);
    }

    fn write_redirect_after_login(&self, path: &str) -> Result<(), domain::StorageError> {
        self.write(KEY_REDIRECT_AFTER_LOGIN, path)
    }

    fn take_redirect_after_login(&self) -> Option<String> {
        let path = self.read(KEY_REDIRECT_AFTER_LOGIN);
        self.store.delete(KEY_REDIRECT_AFTER_LOGIN);
        path
    }
}

impl ConfigRepository for LocalStorage {
    async fn read_config(&self) -> Result<Config, String> {
        match gloo_storage::LocalStorage::get(KEY_CONFIG) {
            Ok(config) => Ok(config),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(Config::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_config(&self, config: Config) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_CONFIG, config).map_err(|err| err.to_string())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
