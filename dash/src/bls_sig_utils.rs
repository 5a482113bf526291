// Rust Dash Library
// Written for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! BLS public keys and signatures as raw bytes.
//!
//! These types only carry the compressed encodings found on the wire.
//! Parsing them into curve points is left to [`crate::crypto::bls`] so that
//! malformed bytes only surface when something is actually verified.

use std::fmt;
use std::io;
use std::str::FromStr;

use crate::consensus::{Decodable, Encodable, encode};

macro_rules! impl_bls_bytes {
    ($name:ident, $len:literal) => {
        impl $name {
            /// Length of the compressed encoding.
            pub const SIZE: usize = $len;

            /// The raw compressed bytes.
            pub fn to_bytes(&self) -> [u8; $len] {
                self.0
            }

            /// Borrows the raw compressed bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Whether every byte is zero, as in an unset field.
            pub fn is_zeroed(&self) -> bool {
                self.0.iter().all(|byte| *byte == 0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = encode::Error;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                let bytes: [u8; $len] = bytes.try_into().map_err(|_| {
                    encode::Error::ParseFailed(concat!(stringify!($name), " must be ", $len, " bytes"))
                })?;
                Ok($name(bytes))
            }
        }

        impl FromStr for $name {
            type Err = encode::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s)
                    .map_err(|_| encode::Error::ParseFailed(concat!(stringify!($name), " is not hex")))?;
                $name::try_from(bytes.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        /// Hex in human readable formats, raw bytes otherwise.
        #[cfg(feature = "serde")]
        impl actual_serde::Serialize for $name {
            fn serialize<S: actual_serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                if s.is_human_readable() {
                    s.collect_str(self)
                } else {
                    s.serialize_bytes(&self.0)
                }
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> actual_serde::Deserialize<'de> for $name {
            fn deserialize<D: actual_serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                use actual_serde::de::{self, SeqAccess, Visitor};

                struct BytesVisitor;

                impl<'de> Visitor<'de> for BytesVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str(concat!($len, " bytes or their hex encoding"))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        $name::from_str(v).map_err(E::custom)
                    }

                    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<$name, E> {
                        $name::try_from(v).map_err(E::custom)
                    }

                    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<$name, A::Error> {
                        let mut bytes = [0u8; $len];
                        for (i, byte) in bytes.iter_mut().enumerate() {
                            *byte = seq
                                .next_element::<u8>()?
                                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
                        }
                        Ok($name(bytes))
                    }
                }

                if d.is_human_readable() {
                    d.deserialize_str(BytesVisitor)
                } else {
                    d.deserialize_bytes(BytesVisitor)
                }
            }
        }

        impl Encodable for $name {
            fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
                self.0.consensus_encode(w)
            }
        }

        impl Decodable for $name {
            fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
                Ok($name(<[u8; $len]>::consensus_decode(r)?))
            }
        }
    };
}

/// A compressed BLS12-381 G1 public key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BLSPublicKey([u8; 48]);

/// A compressed BLS12-381 G2 signature.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BLSSignature([u8; 96]);

impl_bls_bytes!(BLSPublicKey, 48);
impl_bls_bytes!(BLSSignature, 96);
