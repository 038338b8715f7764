// Recording fake session shared by the namespace tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use panofly_api::{Error, ImportKind, ProtocolVersion, ReadMode, XapiClient, Xpath};
use panofly_core::{Device, Scope};

/// One exchange seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Read { mode: ReadMode, xpath: String },
    Set { xpath: String, element: Value },
    Edit { xpath: String, element: Value },
    Delete { xpath: String },
    Unimport { kind: ImportKind, tmpl: String, ts: String, names: Vec<String> },
    Import { kind: ImportKind, tmpl: String, ts: String, vsys: String, names: Vec<String> },
    Log(String),
}

/// Which exchange should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Set,
    Edit,
    Delete,
    Unimport,
    Import,
}

pub struct FakeClient {
    version: ProtocolVersion,
    read_result: Mutex<Value>,
    fail_on: Mutex<Option<Op>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub fn new(version: &str) -> Arc<Self> {
        Arc::new(Self {
            version: version.parse().unwrap(),
            read_result: Mutex::new(Value::Null),
            fail_on: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Result returned by every subsequent read.
    pub fn respond_with(&self, result: Value) {
        *self.read_result.lock().unwrap() = result;
    }

    pub fn fail_on(&self, op: Op) {
        *self.fail_on.lock().unwrap() = Some(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that reached the device (audit records excluded).
    pub fn remote_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Log(_)))
            .collect()
    }

    pub fn audit_log(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Log(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: Op, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(op) {
            return Err(Error::Api {
                code: Some(12),
                message: format!("injected {op:?} failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl XapiClient for FakeClient {
    fn version(&self) -> ProtocolVersion {
        self.version.clone()
    }

    async fn read(&self, mode: ReadMode, xpath: &Xpath) -> Result<Value, Error> {
        self.record(
            Op::Read,
            Call::Read {
                mode,
                xpath: xpath.to_string(),
            },
        )?;
        Ok(self.read_result.lock().unwrap().clone())
    }

    async fn set(&self, xpath: &Xpath, element: Value) -> Result<Value, Error> {
        self.record(
            Op::Set,
            Call::Set {
                xpath: xpath.to_string(),
                element,
            },
        )?;
        Ok(Value::Null)
    }

    async fn edit(&self, xpath: &Xpath, element: Value) -> Result<Value, Error> {
        self.record(
            Op::Edit,
            Call::Edit {
                xpath: xpath.to_string(),
                element,
            },
        )?;
        Ok(Value::Null)
    }

    async fn delete(&self, xpath: &Xpath) -> Result<Value, Error> {
        self.record(
            Op::Delete,
            Call::Delete {
                xpath: xpath.to_string(),
            },
        )?;
        Ok(Value::Null)
    }

    async fn vsys_unimport(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        names: &[String],
    ) -> Result<(), Error> {
        self.record(
            Op::Unimport,
            Call::Unimport {
                kind,
                tmpl: tmpl.into(),
                ts: ts.into(),
                names: names.to_vec(),
            },
        )
    }

    async fn vsys_import(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        vsys: &str,
        names: &[String],
    ) -> Result<(), Error> {
        self.record(
            Op::Import,
            Call::Import {
                kind,
                tmpl: tmpl.into(),
                ts: ts.into(),
                vsys: vsys.into(),
                names: names.to_vec(),
            },
        )
    }

    fn log_action(&self, message: &str) {
        self.calls.lock().unwrap().push(Call::Log(message.to_owned()));
    }
}

pub fn device(fake: &Arc<FakeClient>) -> Device {
    Device::with_client(fake.clone())
}

pub fn tmpl1() -> Scope {
    Scope::template("tmpl1")
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

pub const TMPL1_ROOT: &str = "/config/devices/entry[@name='localhost.localdomain']\
    /template/entry[@name='tmpl1']\
    /config/devices/entry[@name='localhost.localdomain']/network/interface";
