//! Minimal EIP-712 encoder for flat structs.
//!
//! Only the primitive field types used by the CLOB (`string`, `address`,
//! `uint256`, `uint8`) are supported. Fields are encoded in declared order;
//! there is no referenced-type canonicalisation because nested structs are
//! never encoded.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};

use super::keccak::keccak256;
use crate::{Error, Result};

/// Name of the domain struct every typed message carries.
pub const EIP712_DOMAIN: &str = "EIP712Domain";

/// Primitive EIP-712 field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Address,
    Uint256,
    Uint8,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Address => "address",
            FieldType::Uint256 => "uint256",
            FieldType::Uint8 => "uint8",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(FieldType::String),
            "address" => Ok(FieldType::Address),
            "uint256" => Ok(FieldType::Uint256),
            "uint8" => Ok(FieldType::Uint8),
            other => Err(Error::InvalidTypedData {
                message: format!("unsupported field type '{}'", other),
            }),
        }
    }
}

/// A declared struct member: `(name, type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedField {
    pub name: String,
    pub kind: FieldType,
}

impl TypedField {
    pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A value to be encoded for one struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    String(String),
    Address(Address),
    Uint256(U256),
    Uint8(u8),
}

impl TypedValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            TypedValue::String(_) => FieldType::String,
            TypedValue::Address(_) => FieldType::Address,
            TypedValue::Uint256(_) => FieldType::Uint256,
            TypedValue::Uint8(_) => FieldType::Uint8,
        }
    }

    /// Encode into a single 32-byte word.
    ///
    /// Dynamic `string` values are hashed, never inlined.
    pub fn encode_word(&self) -> B256 {
        match self {
            TypedValue::String(s) => keccak256(s.as_bytes()),
            TypedValue::Address(a) => B256::left_padding_from(a.as_slice()),
            TypedValue::Uint256(v) => B256::from(v.to_be_bytes::<32>()),
            TypedValue::Uint8(v) => B256::from(U256::from(*v).to_be_bytes::<32>()),
        }
    }
}

/// Raw typed data: primary type, domain values, message values and the
/// declared struct shapes.
#[derive(Debug, Clone)]
pub struct TypedDataRaw {
    pub primary_type: String,
    pub domain: Vec<TypedValue>,
    pub message: Vec<TypedValue>,
    pub types: BTreeMap<String, Vec<TypedField>>,
}

impl TypedDataRaw {
    /// `T(type_0 name_0,type_1 name_1,...)` in declared field order.
    pub fn encode_type(&self, struct_name: &str) -> Result<String> {
        let fields = self.fields(struct_name)?;
        let members = fields
            .iter()
            .map(|f| format!("{} {}", f.kind, f.name))
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("{}({})", struct_name, members))
    }

    pub fn type_hash(&self, struct_name: &str) -> Result<B256> {
        Ok(keccak256(self.encode_type(struct_name)?.as_bytes()))
    }

    /// `typeHash(T) || encodeValue(v_0) || ...`
    pub fn encode_data(&self, struct_name: &str, values: &[TypedValue]) -> Result<Vec<u8>> {
        let fields = self.fields(struct_name)?;
        if fields.len() != values.len() {
            return Err(Error::InvalidTypedData {
                message: format!(
                    "{} declares {} fields but {} values were given",
                    struct_name,
                    fields.len(),
                    values.len()
                ),
            });
        }

        let mut encoded = Vec::with_capacity(32 * (values.len() + 1));
        encoded.extend_from_slice(self.type_hash(struct_name)?.as_slice());

        for (field, value) in fields.iter().zip(values) {
            if field.kind != value.field_type() {
                return Err(Error::InvalidTypedData {
                    message: format!(
                        "{}.{} is declared {} but holds a {} value",
                        struct_name,
                        field.name,
                        field.kind,
                        value.field_type()
                    ),
                });
            }
            encoded.extend_from_slice(value.encode_word().as_slice());
        }

        Ok(encoded)
    }

    pub fn struct_hash(&self, struct_name: &str, values: &[TypedValue]) -> Result<B256> {
        Ok(keccak256(self.encode_data(struct_name, values)?))
    }

    pub fn domain_separator(&self) -> Result<B256> {
        self.struct_hash(EIP712_DOMAIN, &self.domain)
    }

    /// Final digest to sign: `keccak256(0x19 0x01 || domainSeparator || structHash)`.
    pub fn encode(&self) -> Result<B256> {
        let domain_separator = self.domain_separator()?;
        let message_hash = self.struct_hash(&self.primary_type, &self.message)?;
        Ok(signing_digest(domain_separator, message_hash))
    }

    fn fields(&self, struct_name: &str) -> Result<&[TypedField]> {
        self.types
            .get(struct_name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::InvalidTypedData {
                message: format!("type '{}' is not declared", struct_name),
            })
    }
}

/// Compute the EIP-712 typed data hash from its two halves.
pub fn signing_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut data = [0u8; 66];
    data[0] = 0x19;
    data[1] = 0x01;
    data[2..34].copy_from_slice(domain_separator.as_slice());
    data[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(data)
}
