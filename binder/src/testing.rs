//! Test doubles shared across modules.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_primitives::{Address, B256, Bytes, address};
use zeroize::Zeroizing;

use crate::chain::{
    BindCall, BindingResult, BridgeClient, GasSettings, Password, PasswordPrompt, QueryCall,
    SubmissionReceipt,
};
use crate::error::Error;

/// Proxy contract every fake binding lives on.
pub const PROXY: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

/// Web3 Secret Storage reference vector, password `testpassword`.
pub const KEYSTORE: &str = r#"{
    "crypto": {
        "cipher": "aes-128-ctr",
        "cipherparams": { "iv": "6087dab2f9fdbbfaddc31a909735c1e6" },
        "ciphertext": "5318b4d5bcd28de64ee5559e671353e16f075ecae9f99c7a79a38af5f869aa46",
        "kdf": "pbkdf2",
        "kdfparams": {
            "c": 262144,
            "dklen": 32,
            "prf": "hmac-sha256",
            "salt": "ae3cd4e7013836a3df6bd7241b12db061dbe2c6785853cce422d148a624ce0bd"
        },
        "mac": "517ead924a9d0dc3124507e3393d175ce3ff7c1e96529c6c555ce9a51b5f1c37"
    },
    "id": "3198bc9c-6672-5ab3-d995-4942343ae5b6",
    "version": 3
}"#;

/// Write [`KEYSTORE`] into `dir` and return its path.
pub fn keystore_file(dir: &Path) -> PathBuf {
    let path = dir.join("wallet.json");
    std::fs::write(&path, KEYSTORE).unwrap();
    path
}

/// Prompt that always answers with the same password.
#[derive(Debug)]
pub struct FixedPrompt(pub &'static str);

impl PasswordPrompt for FixedPrompt {
    fn read_password(&self) -> Result<Password, Error> {
        Ok(Zeroizing::new(self.0.to_owned()))
    }
}

/// In-memory lock proxy.
#[derive(Debug, Default)]
pub struct FakeClient {
    bindings: Mutex<HashMap<(Address, QueryCall), Bytes>>,
    queries: AtomicUsize,
    submits: AtomicUsize,
    /// Bindings only become visible from this query onward (1-based).
    visible_from: Option<usize>,
    fail_queries: bool,
    reject_submits: bool,
    last_gas: Mutex<Option<GasSettings>>,
}

impl FakeClient {
    /// Hide bindings from queries before the `query`-th one.
    pub fn settling_after(mut self, query: usize) -> Self {
        self.visible_from = Some(query);
        self
    }

    /// Make every query fail as a reverted call.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Make every submission fail as if the node refused it.
    pub fn rejecting_submissions(mut self) -> Self {
        self.reject_submits = true;
        self
    }

    /// Apply a binding directly, as if already settled.
    pub fn bind_now(&self, call: &BindCall) {
        self.bindings
            .lock()
            .unwrap()
            .insert((PROXY, call.verification()), call.expected().clone());
    }

    /// Number of queries served so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of submissions received so far.
    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    /// Fee parameters of the latest submission.
    pub fn last_gas(&self) -> Option<GasSettings> {
        *self.last_gas.lock().unwrap()
    }
}

impl BridgeClient for FakeClient {
    async fn query(&self, proxy: Address, call: &QueryCall) -> Result<BindingResult, Error> {
        let n = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_queries {
            return Err(Error::Decode(format!("{} execution failed", call.selector())));
        }
        if self.visible_from.is_some_and(|from| n < from) {
            return Ok(BindingResult::default());
        }
        let payload = self
            .bindings
            .lock()
            .unwrap()
            .get(&(proxy, call.clone()))
            .cloned()
            .unwrap_or_default();
        Ok(BindingResult { payload })
    }

    async fn submit(
        &self,
        proxy: Address,
        call: &BindCall,
        gas: GasSettings,
    ) -> Result<SubmissionReceipt, Error> {
        let n = self.submits.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_gas.lock().unwrap() = Some(gas);
        if self.reject_submits {
            return Err(Error::Submission(format!(
                "{} rejected: insufficient funds for gas * price + value",
                call.selector()
            )));
        }
        self.bindings
            .lock()
            .unwrap()
            .insert((proxy, call.verification()), call.expected().clone());
        Ok(SubmissionReceipt {
            tx_hash: B256::with_last_byte(u8::try_from(n).unwrap()),
        })
    }
}
