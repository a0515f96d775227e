//! # Route Modules
//!
//! One module per API domain. Each exposes a `router()` returning a
//! `Router<AppState>` that the app assembly merges.
//!
//! | Prefix                | Module            | Domain                       |
//! |-----------------------|-------------------|------------------------------|
//! | `/api/login`          | [`login`]         | Age-verified login           |
//! | `/api/verify/*`       | [`verify`]        | Proof verification & OCR     |
//! | `/api/wallet/*`       | [`wallet`]        | Deposit metadata             |
//! | `/api/solvency/*`     | [`solvency`]      | Solvency attestation         |
//! | `/api/portfolio/*`    | [`portfolio`]     | Holdings, trades, watchlist  |
//! | `/api/staking/*`      | [`staking`]       | Pools, positions, rewards    |
//! | `/api/notifications`, `/api/alerts` | [`notifications`] | Feed & price alerts |

pub mod login;
pub mod notifications;
pub mod portfolio;
pub mod solvency;
pub mod staking;
pub mod verify;
pub mod wallet;
