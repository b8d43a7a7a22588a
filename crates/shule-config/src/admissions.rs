//! School-specific admission settings.
//!
//! Fees are fixed per level and live on the level type itself; this config
//! carries what differs between deployments.

use std::env;

use serde::Serialize;
use utoipa::ToSchema;

/// A bank or mobile-money account parents can pay into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaymentChannel {
    pub name: String,
    pub account_number: String,
    pub account_name: String,
}

#[derive(Clone, Debug)]
pub struct AdmissionConfig {
    pub school_name: String,
    /// Initial parent PIN for every newly registered student.
    pub default_parent_password: String,
    pub payment_channels: Vec<PaymentChannel>,
}

const DEFAULT_CHANNELS: [(&str, &str); 5] = [
    ("NMB", "0123456789"),
    ("CRDB", "9876543210"),
    ("AIRTEL MONEY", "0755123456"),
    ("TIGO PESA", "0655123456"),
    ("MPESA", "0744123456"),
];

impl AdmissionConfig {
    pub fn from_env() -> Self {
        let school_name = env::var("SCHOOL_NAME").unwrap_or_else(|_| "Zanzibar School".to_string());
        let default_parent_password =
            env::var("PARENT_DEFAULT_PASSWORD").unwrap_or_else(|_| "2525".to_string());
        let payment_channels = DEFAULT_CHANNELS
            .iter()
            .map(|(name, account)| PaymentChannel {
                name: (*name).to_string(),
                account_number: (*account).to_string(),
                account_name: school_name.clone(),
            })
            .collect();

        Self {
            school_name,
            default_parent_password,
            payment_channels,
        }
    }
}
