//! # Configuration Module
//!
//! Settings are layered from built-in defaults, `config/default.toml`,
//! `config/{RUN_ENV}.toml`, `APP__SECTION__KEY` variables and finally the
//! plain overrides (`DATABASE_URL`, `JWT_SECRET`, `ADMIN_USERNAME`, ...).
//! A `.env` file is read first when present.
//!
//! ```rust,ignore
//! use travel_desk::config::Settings;
//!
//! let settings = Settings::load()?;
//! let addr = settings.server.socket_addr()?;
//! ```

mod settings;

pub use settings::*;
