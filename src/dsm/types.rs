//! DSM API Type Definitions
//!
//! Serde records for the payloads returned by the DSM endpoints this crate reads.
//!
//! # Design Notes
//!
//! - **Permissive**: every field except the record `id` is optional, and unknown
//!   fields are ignored, so payloads from older or newer DSM firmware still decode.
//! - **Nullable sequences**: DSM sometimes sends `null` where a list is expected;
//!   those decode as empty lists.
//! - **Numeric strings**: byte counts arrive as either JSON numbers or decimal
//!   strings (`"1073741824"`); both decode to `u64`.
//!
//! # API Endpoints Covered
//!
//! - `SYNO.DSM.Network` / `list` → [`NetworkInfo`], [`Interface`]
//! - `SYNO.Storage.CGI.Storage` / `load_info` → [`StorageInfo`], [`Disk`],
//!   [`StoragePool`], [`Volume`]

use serde::{de, Deserialize, Deserializer};

/// `data` payload of `SYNO.DSM.Network` / `list`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkInfo {
    #[serde(default, deserialize_with = "one_or_many")]
    pub(crate) dns: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) gateway: Option<String>,
    #[serde(default)]
    pub(crate) hostname: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) interfaces: Vec<Interface>,
    #[serde(default)]
    pub(crate) workgroup: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Interface {
    pub id: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: Vec<InterfaceAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InterfaceAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub netmask: Option<String>,
}

/// Storage topology from `SYNO.Storage.CGI.Storage` / `load_info`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StorageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) disks: Vec<Disk>,
    #[serde(default)]
    pub(crate) env: Option<serde_json::Value>,
    #[serde(
        rename = "storagePools",
        default,
        deserialize_with = "null_as_default"
    )]
    pub(crate) storage_pools: Vec<StoragePool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Disk {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub smart_status: Option<String>,
    #[serde(default)]
    pub exceed_bad_sector_thr: Option<bool>,
    #[serde(default)]
    pub below_remain_life_thr: Option<bool>,
    /// Celsius; DSM reports `0` or `null` for disks without a sensor reading
    #[serde(default)]
    pub temp: Option<i64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub size_total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoragePool {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    /// Volume this pool backs directly (RAID layouts)
    #[serde(default)]
    pub deploy_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disks: Vec<String>,
    /// Volumes carved out of this pool (SHR layouts)
    #[serde(default, deserialize_with = "null_as_default")]
    pub pool_child: Vec<PoolChild>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PoolChild {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub fs_type: Option<String>,
    #[serde(default)]
    pub size: Option<VolumeSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeSize {
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub used: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(value)) => Some(vec![value]),
        Some(OneOrMany::Many(values)) => Some(values),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid byte count {text:?}: {e}"))),
    }
}
