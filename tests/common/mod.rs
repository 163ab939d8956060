#![allow(dead_code)]

use nested_zip::{Contract, FileData};
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub fn file_data(receipt_id: &str, receipt_no: &str, filename: &str) -> FileData {
    FileData {
        receipt_id: receipt_id.to_string(),
        receipt_no: receipt_no.to_string(),
        receipt_sequence: "1".to_string(),
        file_id: format!("F{:0>3}", receipt_id),
        filename: filename.to_string(),
        file_size: 2048,
    }
}

pub fn contract(id: &str, no: &str, seq: &str, items: Vec<FileData>) -> Contract {
    Contract {
        contract_id: id.to_string(),
        contract_no: no.to_string(),
        contract_sequence: seq.to_string(),
        items,
    }
}

/// The two-contract sample the contracts API hands out.
pub fn sample_contracts() -> Vec<Contract> {
    vec![
        contract(
            "1",
            "C001",
            "01",
            vec![
                file_data("1", "P001", "File1.txt"),
                file_data("2", "P002", "File2.txt"),
            ],
        ),
        contract("2", "C002", "02", vec![file_data("11", "P011", "File11.txt")]),
    ]
}

pub fn open_archive(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes)).unwrap()
}

pub fn entry_names(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

pub fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut entry = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    content
}
