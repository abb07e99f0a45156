//! Published IPNS record as stored in the DHT
//!
//! Message layout follows the IPNS record schema (proto2, all fields
//! optional on the wire). This crate only decodes it; signatures and
//! validity are not checked here.

use prost::Message;

use crate::Result;

/// Validity scheme of an IPNS record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ValidityType {
    /// `validity` holds an RFC 3339 end-of-life timestamp
    Eol = 0,
}

/// Raw IPNS record
#[derive(Clone, PartialEq, prost::Message)]
pub struct IpnsEntry {
    /// Target path the name points to
    #[prost(bytes = "vec", optional, tag = "1")]
    pub value: Option<Vec<u8>>,

    /// Legacy signature over value, validity and validity type
    #[prost(bytes = "vec", optional, tag = "2")]
    pub signature_v1: Option<Vec<u8>>,

    #[prost(enumeration = "ValidityType", optional, tag = "3")]
    pub validity_type: Option<i32>,

    /// Expiry encoded according to `validity_type`
    #[prost(bytes = "vec", optional, tag = "4")]
    pub validity: Option<Vec<u8>>,

    /// Monotonic sequence number of the record
    #[prost(uint64, optional, tag = "5")]
    pub sequence: Option<u64>,

    /// Caching hint in nanoseconds
    #[prost(uint64, optional, tag = "6")]
    pub ttl: Option<u64>,

    /// Public key, present when it cannot be inlined in the name
    #[prost(bytes = "vec", optional, tag = "7")]
    pub pub_key: Option<Vec<u8>>,

    /// Signature over the CBOR `data` field
    #[prost(bytes = "vec", optional, tag = "8")]
    pub signature_v2: Option<Vec<u8>>,

    /// CBOR copy of the record fields
    #[prost(bytes = "vec", optional, tag = "9")]
    pub data: Option<Vec<u8>>,
}

impl IpnsEntry {
    /// Decode a record from its protocol-buffer bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    /// Encode the record to protocol-buffer bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Target path as text, if present and valid UTF-8
    pub fn value_str(&self) -> Option<&str> {
        self.value
            .as_deref()
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Validity (EOL timestamp) as text, if present and valid UTF-8
    pub fn validity_str(&self) -> Option<&str> {
        self.validity
            .as_deref()
            .and_then(|v| std::str::from_utf8(v).ok())
    }
}
