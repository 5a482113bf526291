//! Process wide BLS backend.
//!
//! Quorum and lock signatures are checked through a single backend handle
//! that is created the first time anything needs it. Threads racing on that
//! first use block on the same initialization, and every later call reads
//! the cached handle.
//!
//! Points are decoded from the raw byte wrappers of [`crate::bls_sig_utils`]
//! into owned `blsful` values that are released as soon as they go out of
//! scope, whether verification succeeded or not.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use blsful::Bls12381G2Impl;
use blsful::inner_types::{G1Affine, G1Projective, G2Affine, G2Projective};
use tracing::{debug, trace};

use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::sml::quorum_validation_error::QuorumValidationError;

pub type PublicKey = blsful::PublicKey<Bls12381G2Impl>;
pub type Signature = blsful::Signature<Bls12381G2Impl>;

static BACKEND: OnceLock<BlsBackend> = OnceLock::new();
static INITIALIZATIONS: AtomicUsize = AtomicUsize::new(0);

/// Handle to the BLS12-381 implementation used for all verification.
#[derive(Debug)]
pub struct BlsBackend {
    scheme: &'static str,
}

/// Returns the process wide backend, initializing it on first use.
pub fn backend() -> &'static BlsBackend {
    BACKEND.get_or_init(|| {
        INITIALIZATIONS.fetch_add(1, Ordering::SeqCst);
        let backend = BlsBackend { scheme: "bls12381g2-basic" };
        debug!(scheme = backend.scheme, "BLS backend initialized");
        backend
    })
}

/// How many times the backend has been initialized in this process.
pub fn initialization_count() -> usize {
    INITIALIZATIONS.load(Ordering::SeqCst)
}

const COMPRESSION_FLAG: u8 = 0x80;
const INFINITY_FLAG: u8 = 0x40;
const SIGN_FLAG: u8 = 0x20;

/// Moves the flags of a legacy compressed point into the modern layout.
///
/// Keys and signatures produced before the basic scheme carry no compression
/// or infinity flag and use the top bit for the sign of `y`. Returns `None`
/// when the flags cannot be legacy ones.
fn legacy_flags(first: u8) -> Option<u8> {
    if first & (INFINITY_FLAG | SIGN_FLAG) != 0 {
        return None;
    }
    let sign = if first & COMPRESSION_FLAG != 0 { SIGN_FLAG } else { 0 };
    Some(COMPRESSION_FLAG | sign)
}

fn legacy_g1_to_modern(bytes: &[u8; 48]) -> Option<[u8; 48]> {
    let flags = legacy_flags(bytes[0])?;
    let mut modern = *bytes;
    modern[0] = (modern[0] & !COMPRESSION_FLAG) | flags;
    Some(modern)
}

/// Legacy G2 points also write the `x` coefficients in the opposite order.
fn legacy_g2_to_modern(bytes: &[u8; 96]) -> Option<[u8; 96]> {
    let flags = legacy_flags(bytes[0])?;
    let mut modern = [0u8; 96];
    modern[..48].copy_from_slice(&bytes[48..]);
    modern[48..].copy_from_slice(&bytes[..48]);
    modern[48] &= !COMPRESSION_FLAG;
    if modern[0] & (COMPRESSION_FLAG | INFINITY_FLAG | SIGN_FLAG) != 0 {
        return None;
    }
    modern[0] |= flags;
    Some(modern)
}

fn decode_g1(bytes: &[u8; 48]) -> Option<G1Projective> {
    Option::<G1Affine>::from(G1Affine::from_compressed(bytes))
        .or_else(|| {
            legacy_g1_to_modern(bytes)
                .and_then(|modern| Option::<G1Affine>::from(G1Affine::from_compressed(&modern)))
        })
        .map(G1Projective::from)
}

fn decode_g2(bytes: &[u8; 96]) -> Option<G2Projective> {
    Option::<G2Affine>::from(G2Affine::from_compressed(bytes))
        .or_else(|| {
            legacy_g2_to_modern(bytes)
                .and_then(|modern| Option::<G2Affine>::from(G2Affine::from_compressed(&modern)))
        })
        .map(G2Projective::from)
}

impl TryFrom<&BLSPublicKey> for PublicKey {
    type Error = QuorumValidationError;

    fn try_from(value: &BLSPublicKey) -> Result<Self, Self::Error> {
        decode_g1(value.as_bytes())
            .map(blsful::PublicKey)
            .ok_or_else(|| QuorumValidationError::InvalidBLSPublicKey(value.to_string()))
    }
}

impl TryFrom<&BLSSignature> for Signature {
    type Error = QuorumValidationError;

    fn try_from(value: &BLSSignature) -> Result<Self, Self::Error> {
        decode_g2(value.as_bytes())
            .map(Signature::Basic)
            .ok_or_else(|| QuorumValidationError::InvalidBLSSignature(value.to_string()))
    }
}

impl BlsBackend {
    /// Name of the signature scheme the backend verifies.
    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn public_key_from_bytes(
        &self,
        public_key: &BLSPublicKey,
    ) -> Result<PublicKey, QuorumValidationError> {
        PublicKey::try_from(public_key)
    }

    pub fn signature_from_bytes(
        &self,
        signature: &BLSSignature,
    ) -> Result<Signature, QuorumValidationError> {
        Signature::try_from(signature)
    }

    /// Sums public keys so that one verification covers a signature aggregated
    /// over the same message.
    pub fn aggregate_public_keys<I>(&self, public_keys: I) -> Result<PublicKey, QuorumValidationError>
    where
        I: IntoIterator<Item = PublicKey>,
    {
        public_keys
            .into_iter()
            .map(|public_key| public_key.0)
            .reduce(|aggregate, point| aggregate + point)
            .map(blsful::PublicKey)
            .ok_or(QuorumValidationError::NoSigners)
    }

    /// Checks a decoded signature, keeping the backend's reason on failure.
    pub fn verify_decoded(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &Signature,
    ) -> Result<(), String> {
        signature.verify(public_key, message).map_err(|e| e.to_string())
    }

    /// Verifies `signature` by `public_key` over `message`.
    ///
    /// Bytes that do not decode to curve points make the signature invalid,
    /// they are not reported as errors.
    pub fn verify(&self, public_key: &BLSPublicKey, message: &[u8], signature: &BLSSignature) -> bool {
        let decoded = self
            .public_key_from_bytes(public_key)
            .and_then(|public_key| Ok((public_key, self.signature_from_bytes(signature)?)));
        match decoded {
            Ok((public_key, signature)) => {
                self.verify_decoded(&public_key, message, &signature).is_ok()
            }
            Err(e) => {
                trace!(error = %e, "signature rejected before verification");
                false
            }
        }
    }
}
