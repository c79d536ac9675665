//! HMAC (RFC 2104) over a block hash.

use core::mem;

use sha2::digest::core_api::BlockSizeUser;
use sha2::digest::typenum::Unsigned;
use sha2::digest::{Digest, OutputSizeUser};
use sha2::{Sha256, Sha512};
use zeroize::Zeroize;

use super::Mac;

/// Largest block size among the supported digests (SHA-512).
const MAX_BLOCK_SIZE: usize = 128;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// HMAC-SHA-256.
pub type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA-512.
pub type HmacSha512 = Hmac<Sha512>;

/// HMAC keyed state over digest `D`.
///
/// The padded outer key is kept until [`Mac::digest`] and wiped on drop.
pub struct Hmac<D: Digest + BlockSizeUser> {
    inner: D,
    outer_key: [u8; MAX_BLOCK_SIZE],
}

impl<D: Digest + BlockSizeUser> Hmac<D> {
    fn block_size() -> usize {
        <D as BlockSizeUser>::BlockSize::USIZE
    }
}

impl<D: Digest + BlockSizeUser> Mac for Hmac<D> {
    const OUTPUT_SIZE: usize = <D as OutputSizeUser>::OutputSize::USIZE;

    fn init(key: &[u8]) -> Self {
        let block_size = Self::block_size();
        let mut padded = [0u8; MAX_BLOCK_SIZE];

        if key.len() > block_size {
            let hashed = D::digest(key);
            padded[..hashed.len()].copy_from_slice(&hashed);
        } else {
            padded[..key.len()].copy_from_slice(key);
        }

        let mut inner_key = padded;
        let mut outer_key = padded;
        padded.zeroize();

        for (i, o) in inner_key[..block_size]
            .iter_mut()
            .zip(outer_key[..block_size].iter_mut())
        {
            *i ^= IPAD;
            *o ^= OPAD;
        }

        let mut inner = D::new();
        inner.update(&inner_key[..block_size]);
        inner_key.zeroize();

        Self { inner, outer_key }
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn digest(mut self, out: &mut [u8]) {
        let inner_hash = mem::replace(&mut self.inner, D::new()).finalize();

        let mut outer = D::new();
        outer.update(&self.outer_key[..Self::block_size()]);
        outer.update(&inner_hash);

        out.copy_from_slice(&outer.finalize());
    }
}

impl<D: Digest + BlockSizeUser> Drop for Hmac<D> {
    fn drop(&mut self) {
        self.outer_key.zeroize();
    }
}
