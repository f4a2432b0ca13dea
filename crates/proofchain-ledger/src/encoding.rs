//! # Canonical Transaction Encoding
//!
//! Algorand-style wire encoding: msgpack with keys in ascending order and
//! zero-valued fields omitted. Canonical bytes matter because the signature
//! and the transaction id are both computed over them; a generic serializer
//! makes no canonicality promise, so the writer here is explicit.
//!
//! Also provides the base32 forms used for transaction ids and addresses.

use sha2::{Digest, Sha512_256};

use proofchain_core::NetworkParams;

/// Domain separation prefix for transaction signing and ids.
const TX_PREFIX: &[u8] = b"TX";

/// RFC 4648 base32 alphabet, unpadded, as used for tx ids and addresses.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// ---------------------------------------------------------------------------
// msgpack writer
// ---------------------------------------------------------------------------

/// A msgpack value accepted by the canonical writer.
enum Value<'a> {
    Uint(u64),
    Str(&'a str),
    Bin(&'a [u8]),
    /// Pre-encoded msgpack, appended verbatim (nested maps).
    Raw(&'a [u8]),
}

/// Minimal msgpack writer emitting only the canonical encodings this adapter
/// needs: maps of up to 15 entries, strings, byte arrays, unsigned integers.
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn map_header(&mut self, len: usize) {
        debug_assert!(len < 16, "fixmap only");
        self.buf.push(0x80 | len as u8);
    }

    fn str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        match bytes.len() {
            0..=31 => self.buf.push(0xa0 | bytes.len() as u8),
            32..=255 => {
                self.buf.push(0xd9);
                self.buf.push(bytes.len() as u8);
            }
            _ => {
                self.buf.push(0xda);
                self.buf
                    .extend_from_slice(&(bytes.len() as u16).to_be_bytes());
            }
        }
        self.buf.extend_from_slice(bytes);
    }

    fn bin(&mut self, bytes: &[u8]) {
        match bytes.len() {
            0..=255 => {
                self.buf.push(0xc4);
                self.buf.push(bytes.len() as u8);
            }
            _ => {
                self.buf.push(0xc5);
                self.buf
                    .extend_from_slice(&(bytes.len() as u16).to_be_bytes());
            }
        }
        self.buf.extend_from_slice(bytes);
    }

    fn uint(&mut self, v: u64) {
        match v {
            0..=0x7f => self.buf.push(v as u8),
            0x80..=0xff => {
                self.buf.push(0xcc);
                self.buf.push(v as u8);
            }
            0x100..=0xffff => {
                self.buf.push(0xcd);
                self.buf.extend_from_slice(&(v as u16).to_be_bytes());
            }
            0x1_0000..=0xffff_ffff => {
                self.buf.push(0xce);
                self.buf.extend_from_slice(&(v as u32).to_be_bytes());
            }
            _ => {
                self.buf.push(0xcf);
                self.buf.extend_from_slice(&v.to_be_bytes());
            }
        }
    }

    /// Write a map whose entries are already filtered (no zero values) and
    /// in ascending key order.
    fn map(&mut self, entries: &[(&str, Value<'_>)]) {
        debug_assert!(
            entries.windows(2).all(|w| w[0].0 < w[1].0),
            "map keys must be strictly ascending"
        );
        self.map_header(entries.len());
        for (key, value) in entries {
            self.str(key);
            match value {
                Value::Uint(v) => self.uint(*v),
                Value::Str(s) => self.str(s),
                Value::Bin(b) => self.bin(b),
                Value::Raw(raw) => self.buf.extend_from_slice(raw),
            }
        }
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// asset-create transaction
// ---------------------------------------------------------------------------

/// Unit-supply asset-creation transaction: total fixed at creation,
/// 0 decimals, metadata URL embedding the certificate fingerprint.
/// Ownership of the single unit stays with the issuing account.
pub struct AssetCreateTransaction<'a> {
    pub sender: [u8; 32],
    pub asset_name: &'a str,
    pub unit_name: &'a str,
    pub url: String,
    pub total: u64,
    pub params: &'a NetworkParams,
}

impl AssetCreateTransaction<'_> {
    /// Canonical unsigned transaction bytes.
    pub fn encode(&self) -> Vec<u8> {
        // Asset parameters. Decimals is zero and therefore omitted.
        let mut apar = Writer::new();
        apar.map(&[
            ("an", Value::Str(self.asset_name)),
            ("au", Value::Str(&self.url)),
            ("t", Value::Uint(self.total)),
            ("un", Value::Str(self.unit_name)),
        ]);
        let apar = apar.finish();

        let p = self.params;
        let mut entries: Vec<(&str, Value<'_>)> = Vec::with_capacity(8);
        entries.push(("apar", Value::Raw(&apar)));
        if p.fee > 0 {
            entries.push(("fee", Value::Uint(p.fee)));
        }
        if p.first_valid > 0 {
            entries.push(("fv", Value::Uint(p.first_valid)));
        }
        if !p.genesis_id.is_empty() {
            entries.push(("gen", Value::Str(&p.genesis_id)));
        }
        if !p.genesis_hash.is_empty() {
            entries.push(("gh", Value::Bin(&p.genesis_hash)));
        }
        if p.last_valid > 0 {
            entries.push(("lv", Value::Uint(p.last_valid)));
        }
        entries.push(("snd", Value::Bin(&self.sender)));
        entries.push(("type", Value::Str("acfg")));

        let mut txn = Writer::new();
        txn.map(&entries);
        txn.finish()
    }
}

/// Prefix the canonical transaction bytes for signing and id derivation.
pub fn domain_separated(encoded_txn: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(TX_PREFIX.len() + encoded_txn.len());
    out.extend_from_slice(TX_PREFIX);
    out.extend_from_slice(encoded_txn);
    out
}

/// Wrap a signature and canonical transaction into the broadcast blob.
pub fn encode_signed(signature: &[u8; 64], encoded_txn: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.map(&[
        ("sig", Value::Bin(signature)),
        ("txn", Value::Raw(encoded_txn)),
    ]);
    w.finish()
}

/// Locally derived transaction id: base32 of the SHA-512/256 digest of the
/// domain-separated transaction.
pub fn transaction_id(encoded_txn: &[u8]) -> String {
    let digest = Sha512_256::digest(domain_separated(encoded_txn));
    base32_nopad(&digest)
}

/// Human-readable account address: base32 of the public key followed by the
/// last four bytes of its SHA-512/256 digest as a checksum.
pub fn address_from_public_key(public_key: &[u8; 32]) -> String {
    let digest = Sha512_256::digest(public_key);
    let mut bytes = Vec::with_capacity(36);
    bytes.extend_from_slice(public_key);
    bytes.extend_from_slice(&digest[28..32]);
    base32_nopad(&bytes)
}

/// Unpadded RFC 4648 base32.
pub fn base32_nopad(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    for chunk in data.chunks(5) {
        let mut buf = [0u8; 5];
        buf[..chunk.len()].copy_from_slice(chunk);
        let v = u64::from_be_bytes([0, 0, 0, buf[0], buf[1], buf[2], buf[3], buf[4]]);

        let symbols = match chunk.len() {
            1 => 2,
            2 => 4,
            3 => 5,
            4 => 7,
            _ => 8,
        };
        for i in 0..symbols {
            let shift = 35 - 5 * i;
            let index = ((v >> shift) & 0x1f) as usize;
            out.push(BASE32_ALPHABET[index] as char);
        }
    }
    out
}
