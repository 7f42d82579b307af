//! Key types and generation.

use crate::error::GlsError;
use crate::hash::blake2s::Blake2sContext;
use crate::point::Point;
use crate::scalar;

/// A GLS254 public key: a curve point plus its canonical 32-byte encoding,
/// cached so repeated signing/verification doesn't re-encode it.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    pub(crate) point: Point,
    pub(crate) enc: [u8; 32],
}

impl PublicKey {
    /// Decodes a public key from its compressed 32-byte encoding, rejecting
    /// anything that does not decode to a point in the prime-order subgroup.
    /// The neutral element itself is also rejected: it is a valid *point*
    /// encoding but never a usable public key.
    pub fn decode(bytes: &[u8; 32]) -> Result<PublicKey, GlsError> {
        let (point, ok) = Point::decode(bytes);
        if ok.is_true() && !point.isneutral().is_true() {
            Ok(PublicKey { point, enc: *bytes })
        } else {
            Err(GlsError::MalformedPoint)
        }
    }

    pub fn encode(&self) -> [u8; 32] {
        self.enc
    }
}

/// A GLS254 private key: a reduced, nonzero scalar plus its public key.
#[derive(Clone, Copy, Debug)]
pub struct PrivateKey {
    pub(crate) sec: [u8; 32],
    pub(crate) pk: PublicKey,
}

impl PrivateKey {
    /// Derives a key pair from arbitrary-length random seed bytes:
    /// `scalar_reduce(BLAKE2s-256("GLS254 keygen:" ‖ rnd))`.
    ///
    /// `rnd` should come from a cryptographically secure source; this
    /// function does not gather entropy itself.
    pub fn keygen(rnd: &[u8]) -> PrivateKey {
        let mut ctx = Blake2sContext::new(32);
        ctx.update(b"GLS254 keygen:");
        ctx.update(rnd);
        let mut digest = [0u8; 32];
        ctx.finalize(&mut digest);
        let sec = scalar::reduce(&digest);
        PrivateKey::from_scalar(sec)
    }

    /// Decodes a private key from its raw 32-byte scalar encoding, rejecting
    /// anything that is not a reduced, nonzero scalar.
    pub fn decode(bytes: &[u8; 32]) -> Result<PrivateKey, GlsError> {
        if !scalar::is_reduced(bytes) || scalar::is_zero(bytes) {
            return Err(GlsError::MalformedScalar);
        }
        Ok(PrivateKey::from_scalar(*bytes))
    }

    fn from_scalar(sec: [u8; 32]) -> PrivateKey {
        let point = crate::point::mulgen(&sec);
        let enc = point.encode();
        PrivateKey {
            sec,
            pk: PublicKey { point, enc },
        }
    }

    pub fn encode(&self) -> [u8; 32] {
        self.sec
    }

    pub fn public(&self) -> &PublicKey {
        &self.pk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keygen_is_deterministic_in_the_seed() {
        let a = PrivateKey::keygen(b"some seed bytes");
        let b = PrivateKey::keygen(b"some seed bytes");
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.public().encode(), b.public().encode());
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let a = PrivateKey::keygen(b"seed one");
        let b = PrivateKey::keygen(b"seed two");
        assert_ne!(a.encode(), b.encode());
    }

    #[test]
    fn private_key_round_trips_through_decode() {
        let sk = PrivateKey::keygen(b"round trip seed");
        let decoded = PrivateKey::decode(&sk.encode()).unwrap();
        assert_eq!(decoded.encode(), sk.encode());
        assert_eq!(decoded.public().encode(), sk.public().encode());
    }

    #[test]
    fn public_key_round_trips_through_decode() {
        let sk = PrivateKey::keygen(b"pubkey round trip");
        let pk = PublicKey::decode(&sk.public().encode()).unwrap();
        assert_eq!(pk.encode(), sk.public().encode());
    }

    #[test]
    fn decode_rejects_zero_scalar() {
        assert!(PrivateKey::decode(&[0u8; 32]).is_err());
    }

    #[test]
    fn public_decode_rejects_the_neutral_encoding() {
        // All-zero bytes decode to a valid *point* (the neutral element) but
        // must never be accepted as a usable public key.
        assert!(PublicKey::decode(&[0u8; 32]).is_err());
    }

    #[test]
    fn decode_rejects_unreduced_scalar() {
        let bytes = [0xffu8; 32];
        assert!(PrivateKey::decode(&bytes).is_err());
    }
}
