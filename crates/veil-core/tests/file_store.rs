use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use veil_core::storage::{Backend, FileBackend};
use veil_core::{ChainSpec, CipherKey, Payload, TextEncoding, VeilError};

struct TempStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TempStore {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir should be available");
        let path = dir.path().join("store.veil");
        Self { _dir: dir, path }
    }
}

fn spec(key: &str) -> ChainSpec {
    ChainSpec::new()
        .text(TextEncoding::Utf8)
        .xor(CipherKey::try_from(key).expect("key should be valid"))
}

#[test]
fn test_values_survive_reopen() {
    let temp = TempStore::new();

    let backend = FileBackend::create(&temp.path).expect("create should succeed");
    let mut client = spec("secret").build(backend).expect("build should succeed");
    client.write_text("greeting", "hello").expect("write should succeed");
    drop(client);

    let backend = FileBackend::open(&temp.path).expect("open should succeed");
    let client = spec("secret").build(backend).expect("build should succeed");
    assert_eq!(
        client.read_text("greeting").expect("read should succeed").as_deref(),
        Some("hello")
    );
}

#[test]
fn test_file_never_contains_plaintext() {
    let temp = TempStore::new();
    let backend = FileBackend::create(&temp.path).expect("create");
    let mut client = spec("secret").build(backend).expect("build");
    client
        .write_text("note", "a very recognisable sentence")
        .expect("write");

    let on_disk = fs::read_to_string(&temp.path).expect("read file");
    assert!(!on_disk.contains("recognisable"));

    let backend = FileBackend::open(&temp.path).expect("open");
    let stored = backend.get("note").expect("get").expect("slot");
    assert_ne!(stored, b"a very recognisable sentence".to_vec());
}

#[test]
fn test_chain_mismatch_detected_on_reopen() {
    let temp = TempStore::new();

    let mut backend = FileBackend::create(&temp.path).expect("create");
    backend
        .bind_chain(&spec("right-key").descriptor())
        .expect("first bind should stamp");
    drop(backend);

    let mut backend = FileBackend::open(&temp.path).expect("open");
    let err = backend
        .bind_chain(&spec("wrong-key").descriptor())
        .expect_err("different key must be rejected");
    assert!(matches!(err, VeilError::ChainMismatch(_)));

    let latin = ChainSpec::new()
        .text(TextEncoding::Latin1)
        .xor(CipherKey::try_from("right-key").expect("key"));
    let err = backend
        .bind_chain(&latin.descriptor())
        .expect_err("different encoding must be rejected");
    assert!(err.to_string().contains("iso-8859-1"));
}

#[test]
fn test_descriptor_never_contains_key_material() {
    let temp = TempStore::new();
    let mut backend = FileBackend::create(&temp.path).expect("create");
    backend
        .bind_chain(&spec("hunter2-hunter2").descriptor())
        .expect("bind");

    let on_disk = fs::read_to_string(&temp.path).expect("read file");
    assert!(!on_disk.contains("hunter2"));
    assert!(on_disk.contains("cipher_fingerprints"));
}

#[test]
fn test_bytes_chain_over_file() {
    let temp = TempStore::new();
    let backend = FileBackend::create(&temp.path).expect("create");
    let mut client = ChainSpec::new()
        .xor(CipherKey::new(vec![0xaa]).expect("key"))
        .build(backend)
        .expect("build");

    client.write("blob", vec![0x00u8, 0xaa, 0xff]).expect("write");
    assert_eq!(
        client.read("blob").expect("read"),
        Some(Payload::Bytes(vec![0x00, 0xaa, 0xff]))
    );

    let backend = FileBackend::open(&temp.path).expect("open");
    assert_eq!(
        backend.get("blob").expect("get"),
        Some(vec![0xaa, 0x00, 0x55])
    );
}

#[test]
fn test_open_missing_store() {
    let temp = TempStore::new();
    let err = FileBackend::open(&temp.path).expect_err("missing store");
    assert!(matches!(err, VeilError::StoreNotFound(_)));
}
