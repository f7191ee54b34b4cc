//! Shared test helpers: a scripted DSM client and payload fixtures

#![allow(dead_code)] // Not every test binary uses every helper

use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use synology_dsm_exporter::dsm::ApiClient;
use synology_dsm_exporter::error::{DsmError, Result};

pub const NETWORK_API: &str = "SYNO.DSM.Network";
pub const STORAGE_API: &str = "SYNO.Storage.CGI.Storage";

enum Scripted {
    Response(Option<Value>),
    Failure(String),
}

/// Client that replays queued responses per `(api, method)` and records calls
///
/// Once a queue is drained the client answers `Ok(None)`.
#[derive(Default)]
pub struct FakeClient {
    queues: Mutex<HashMap<(String, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, api: &str, method: &str, item: Scripted) -> Self {
        self.queues
            .lock()
            .unwrap()
            .entry((api.to_string(), method.to_string()))
            .or_default()
            .push_back(item);
        self
    }

    pub fn respond(self, api: &str, method: &str, response: Value) -> Self {
        self.push(api, method, Scripted::Response(Some(response)))
    }

    pub fn respond_none(self, api: &str, method: &str) -> Self {
        self.push(api, method, Scripted::Response(None))
    }

    pub fn fail(self, api: &str, method: &str, message: &str) -> Self {
        self.push(api, method, Scripted::Failure(message.to_string()))
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ApiClient for FakeClient {
    fn get(&self, api: &str, method: &str) -> Result<Option<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((api.to_string(), method.to_string()));

        let next = self
            .queues
            .lock()
            .unwrap()
            .get_mut(&(api.to_string(), method.to_string()))
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Response(value)) => Ok(value),
            Some(Scripted::Failure(message)) => Err(DsmError::Transport(message)),
            None => Ok(None),
        }
    }
}

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// `SYNO.DSM.Network` / `list` response as served by DSM 6
pub fn network_response() -> Value {
    json!({
        "data": {
            "dns": ["192.168.1.1"],
            "gateway": "192.168.1.1",
            "hostname": "HOME-NAS",
            "interfaces": [
                {
                    "id": "eth0",
                    "ip": [{"address": "192.168.1.10", "netmask": "255.255.255.0"}],
                    "mac": "00-11-32-XX-XX-59",
                    "type": "lan"
                },
                {
                    "id": "eth1",
                    "ip": [{"address": "169.254.2.5", "netmask": "255.255.0.0"}],
                    "mac": "00-11-32-XX-XX-5A",
                    "type": "lan"
                }
            ],
            "workgroup": "WORKGROUP"
        },
        "success": true
    })
}

/// Storage topology with one RAID pool (`volume_1`) and one SHR pool
/// carrying `volume_2` and `volume_3`
pub fn storage_payload() -> Value {
    json!({
        "disks": [
            {
                "id": "sata1",
                "name": "Drive 1",
                "device": "/dev/sata1",
                "model": "WD40EFRX-68N32N0",
                "vendor": "WDC",
                "status": "normal",
                "smart_status": "normal",
                "exceed_bad_sector_thr": false,
                "below_remain_life_thr": false,
                "temp": 30,
                "size_total": "4000787030016"
            },
            {
                "id": "sata2",
                "name": "Drive 2",
                "device": "/dev/sata2",
                "model": "WD40EFRX-68N32N0",
                "status": "normal",
                "smart_status": "normal",
                "exceed_bad_sector_thr": false,
                "below_remain_life_thr": false,
                "temp": 40
            },
            {
                "id": "sata3",
                "name": "Drive 3",
                "device": "/dev/sata3",
                "status": "crashed",
                "smart_status": "failing",
                "exceed_bad_sector_thr": true,
                "below_remain_life_thr": true,
                "temp": null
            },
            {
                "id": "sata4",
                "name": "Drive 4",
                "device": "/dev/sata4",
                "status": "normal",
                "smart_status": "normal",
                "temp": 35
            }
        ],
        "env": {"bay_number": "4", "status": {"system_crashed": false}},
        "storagePools": [
            {
                "id": "reuse_1",
                "device_type": "raid_1",
                "status": "normal",
                "deploy_path": "volume_1",
                "disks": ["sata1", "sata2", "sata3"]
            },
            {
                "id": "reuse_2",
                "device_type": "shr_without_disk_protect",
                "status": "normal",
                "disks": ["sata4"],
                "pool_child": [{"id": "volume_2"}, {"id": "volume_3"}]
            }
        ],
        "volumes": [
            {
                "id": "volume_1",
                "status": "normal",
                "device_type": "raid_1",
                "fs_type": "btrfs",
                "size": {"total": "200", "used": "50"}
            },
            {
                "id": "volume_2",
                "status": "degraded",
                "device_type": "shr_without_disk_protect",
                "size": {"total": 1073741824, "used": 0}
            },
            {
                "id": "volume_3",
                "status": "normal",
                "device_type": "shr_without_disk_protect"
            }
        ]
    })
}
