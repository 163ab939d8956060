use crate::domain::model::{ArchiveBundle, Contract};
use crate::utils::error::Result;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::DateTime;

/// Content written for every synthesized file.
pub const PLACEHOLDER_CONTENT: &[u8] = b"Hello World\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Stamp every entry with the ZIP epoch instead of the current time.
    pub deterministic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub entry_name: String,
    /// Files inside the inner archive; zero for bundled blobs.
    pub file_count: usize,
    pub inner_size: usize,
}

/// Outer entries in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub entries: Vec<EntrySummary>,
}

impl BuildReport {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_files(&self) -> usize {
        self.entries.iter().map(|e| e.file_count).sum()
    }

    pub fn total_inner_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.inner_size).sum()
    }
}

/// Percentage of outer entries written, rounded to the nearest integer.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Builds a container archive whose entries are themselves archives.
///
/// Contracts are processed strictly in order: each inner archive is fully
/// finalized in memory before its bytes are written as one outer entry, and
/// before the next contract is started. Any failure aborts the build; bytes
/// already written to the sink are left as they are.
#[derive(Debug, Clone, Default)]
pub struct NestedZipBuilder {
    options: BuildOptions,
}

impl NestedZipBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    fn file_options(&self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default();
        if self.options.deterministic {
            options.last_modified_time(DateTime::default())
        } else {
            options
        }
    }

    /// Returns the finalized inner archive for one contract.
    pub fn build_inner(&self, contract: &Contract) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for file in &contract.items {
            tracing::debug!(
                "Adding {} to inner archive {}",
                file.filename,
                contract.outer_entry_name()
            );
            zip.start_file(file.filename.as_str(), self.file_options())?;
            zip.write_all(PLACEHOLDER_CONTENT)?;
        }

        // finish() writes the central directory; the buffer is unreadable without it
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Writes one inner archive per contract into `sink` and returns the
    /// flushed sink with a report of what was written.
    pub fn build_into<W: Write + Seek>(
        &self,
        sink: W,
        contracts: &[Contract],
    ) -> Result<(W, BuildReport)> {
        let mut outer = ZipWriter::new(sink);
        let mut report = BuildReport::default();

        for (index, contract) in contracts.iter().enumerate() {
            let inner = self.build_inner(contract)?;
            let entry_name = contract.outer_entry_name();

            self.write_entry(&mut outer, &entry_name, &inner)?;

            tracing::info!(
                "Packed {} ({} files, {} bytes) [{}%]",
                entry_name,
                contract.items.len(),
                inner.len(),
                progress_percent(index + 1, contracts.len())
            );

            report.entries.push(EntrySummary {
                entry_name,
                file_count: contract.items.len(),
                inner_size: inner.len(),
            });
        }

        let mut sink = outer.finish()?;
        sink.flush()?;
        Ok((sink, report))
    }

    /// Writes pre-built archive blobs verbatim as outer entries, in order.
    pub fn bundle_into<W: Write + Seek>(
        &self,
        sink: W,
        bundles: &[ArchiveBundle],
    ) -> Result<(W, BuildReport)> {
        let mut outer = ZipWriter::new(sink);
        let mut report = BuildReport::default();

        for (index, bundle) in bundles.iter().enumerate() {
            self.write_entry(&mut outer, &bundle.file_name, &bundle.data)?;

            tracing::info!(
                "Bundled {} ({} bytes) [{}%]",
                bundle.file_name,
                bundle.data.len(),
                progress_percent(index + 1, bundles.len())
            );

            report.entries.push(EntrySummary {
                entry_name: bundle.file_name.clone(),
                file_count: 0,
                inner_size: bundle.data.len(),
            });
        }

        let mut sink = outer.finish()?;
        sink.flush()?;
        Ok((sink, report))
    }

    fn write_entry<W: Write + Seek>(
        &self,
        outer: &mut ZipWriter<W>,
        name: &str,
        data: &[u8],
    ) -> Result<()> {
        outer.start_file(name, self.file_options())?;
        outer.write_all(data)?;
        Ok(())
    }

    /// Creates or overwrites the file at `outer_path` and builds into it.
    pub fn build_file<P: AsRef<Path>>(
        &self,
        outer_path: P,
        contracts: &[Contract],
    ) -> Result<BuildReport> {
        let file = BufWriter::new(File::create(outer_path.as_ref())?);
        let (file, report) = self.build_into(file, contracts)?;
        sync_file(file)?;
        Ok(report)
    }

    pub fn bundle_file<P: AsRef<Path>>(
        &self,
        outer_path: P,
        bundles: &[ArchiveBundle],
    ) -> Result<BuildReport> {
        let file = BufWriter::new(File::create(outer_path.as_ref())?);
        let (file, report) = self.bundle_into(file, bundles)?;
        sync_file(file)?;
        Ok(report)
    }
}

fn sync_file(file: BufWriter<File>) -> Result<()> {
    let file = file.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Builds the nested archive at `outer_path` with default options.
pub fn build_nested_zip<P: AsRef<Path>>(outer_path: P, contracts: &[Contract]) -> Result<BuildReport> {
    NestedZipBuilder::default().build_file(outer_path, contracts)
}

/// Bundles already-built archives into a container at `outer_path`.
pub fn bundle_archives<P: AsRef<Path>>(
    outer_path: P,
    bundles: &[ArchiveBundle],
) -> Result<BuildReport> {
    NestedZipBuilder::default().bundle_file(outer_path, bundles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FileData;
    use crate::utils::error::NestedZipError;
    use std::io::Read;

    fn file(name: &str, size: u64) -> FileData {
        FileData {
            receipt_id: "1".to_string(),
            receipt_no: "P001".to_string(),
            receipt_sequence: "1".to_string(),
            file_id: "F001".to_string(),
            filename: name.to_string(),
            file_size: size,
        }
    }

    fn contract(no: &str, seq: &str, files: &[&str]) -> Contract {
        Contract {
            contract_id: no.to_string(),
            contract_no: no.to_string(),
            contract_sequence: seq.to_string(),
            items: files.iter().map(|f| file(f, 2048)).collect(),
        }
    }

    /// Accepts `limit` bytes, then fails every further write.
    #[derive(Debug)]
    struct ShortSink {
        inner: Cursor<Vec<u8>>,
        limit: usize,
        written: usize,
    }

    impl ShortSink {
        fn new(limit: usize) -> Self {
            Self {
                inner: Cursor::new(Vec::new()),
                limit,
                written: 0,
            }
        }
    }

    impl Write for ShortSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written + buf.len() > self.limit {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "no space left on device",
                ));
            }
            self.written += buf.len();
            self.inner.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl std::io::Seek for ShortSink {
        fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn open(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn names(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_build_inner_keeps_item_order() {
        let builder = NestedZipBuilder::default();
        let inner = builder
            .build_inner(&contract("C001", "01", &["b.txt", "a.txt", "c.txt"]))
            .unwrap();

        let mut archive = open(inner);
        assert_eq!(names(&mut archive), vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn test_build_inner_ignores_file_size() {
        let builder = NestedZipBuilder::default();
        let mut c = contract("C001", "01", &[]);
        c.items.push(file("big.txt", 1_000_000));
        c.items.push(file("zero.txt", 0));

        let mut archive = open(builder.build_inner(&c).unwrap());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            assert_eq!(content, PLACEHOLDER_CONTENT);
            assert_eq!(entry.size(), 12);
        }
    }

    #[test]
    fn test_build_inner_empty_contract_is_valid_archive() {
        let builder = NestedZipBuilder::default();
        let inner = builder.build_inner(&contract("C009", "09", &[])).unwrap();

        let archive = open(inner);
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_build_into_reports_entries_in_order() {
        let builder = NestedZipBuilder::default();
        let contracts = vec![
            contract("C002", "02", &["File11.txt"]),
            contract("C001", "01", &["File1.txt", "File2.txt"]),
        ];

        let (cursor, report) = builder
            .build_into(Cursor::new(Vec::new()), &contracts)
            .unwrap();

        assert_eq!(report.entry_count(), 2);
        assert_eq!(report.total_files(), 3);
        assert_eq!(report.entries[0].entry_name, "C002_02.zip");
        assert_eq!(report.entries[1].entry_name, "C001_01.zip");

        let mut outer = open(cursor.into_inner());
        assert_eq!(names(&mut outer), vec!["C002_02.zip", "C001_01.zip"]);

        let mut entry = outer.by_name("C001_01.zip").unwrap();
        let mut inner = Vec::new();
        entry.read_to_end(&mut inner).unwrap();
        assert_eq!(inner.len(), report.entries[1].inner_size);
    }

    #[test]
    fn test_build_into_without_contracts() {
        let builder = NestedZipBuilder::default();
        let (cursor, report) = builder.build_into(Cursor::new(Vec::new()), &[]).unwrap();

        assert_eq!(report.entry_count(), 0);
        assert_eq!(open(cursor.into_inner()).len(), 0);
    }

    #[test]
    fn test_write_failure_mid_stream_aborts_the_build() {
        let builder = NestedZipBuilder::default();
        let many: Vec<String> = (0..50).map(|i| format!("File{}.txt", i)).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let contracts = vec![
            contract("C001", "01", &many),
            contract("C002", "02", &many),
        ];

        let err = builder
            .build_into(ShortSink::new(200), &contracts)
            .unwrap_err();

        assert!(err.is_io_failure());
    }

    #[test]
    fn test_duplicate_outer_names_fail_the_build() {
        let builder = NestedZipBuilder::default();
        let contracts = vec![
            contract("C001", "01", &["a.txt"]),
            contract("C001", "01", &["b.txt"]),
        ];

        let err = builder
            .build_into(Cursor::new(Vec::new()), &contracts)
            .unwrap_err();

        assert!(matches!(err, NestedZipError::ZipError(_)));
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_duplicate_filenames_in_one_contract_fail_the_build() {
        let builder = NestedZipBuilder::default();
        let err = builder
            .build_inner(&contract("C001", "01", &["a.txt", "a.txt"]))
            .unwrap_err();

        assert!(matches!(err, NestedZipError::ZipError(_)));
    }

    #[test]
    fn test_deterministic_builds_are_byte_identical() {
        let builder = NestedZipBuilder::new(BuildOptions {
            deterministic: true,
        });
        let contracts = vec![
            contract("C001", "01", &["File1.txt", "File2.txt"]),
            contract("C002", "02", &["File11.txt"]),
        ];

        let (first, _) = builder
            .build_into(Cursor::new(Vec::new()), &contracts)
            .unwrap();
        let (second, _) = builder
            .build_into(Cursor::new(Vec::new()), &contracts)
            .unwrap();

        assert_eq!(first.into_inner(), second.into_inner());
    }

    #[test]
    fn test_deterministic_entries_carry_zip_epoch() {
        let builder = NestedZipBuilder::new(BuildOptions {
            deterministic: true,
        });
        let (cursor, _) = builder
            .build_into(Cursor::new(Vec::new()), &[contract("C001", "01", &["a.txt"])])
            .unwrap();

        let mut outer = open(cursor.into_inner());
        let entry = outer.by_index(0).unwrap();
        let modified = entry.last_modified().unwrap();
        assert_eq!(modified.year(), 1980);
        assert_eq!(modified.month(), 1);
        assert_eq!(modified.day(), 1);
    }

    #[test]
    fn test_bundle_into_stores_blobs_verbatim() {
        let builder = NestedZipBuilder::default();
        let blob = vec![80, 75, 3, 4, 20, 0, 0, 0, 8, 0];
        let bundles = vec![
            ArchiveBundle::new("TAX_RECEIPT_1.zip", blob.clone()),
            ArchiveBundle::new("TAX_RECEIPT_2.zip", blob.clone()),
        ];

        let (cursor, report) = builder
            .bundle_into(Cursor::new(Vec::new()), &bundles)
            .unwrap();

        assert_eq!(report.entry_count(), 2);
        assert_eq!(report.total_files(), 0);
        assert_eq!(report.total_inner_bytes(), 20);

        let mut outer = open(cursor.into_inner());
        assert_eq!(
            names(&mut outer),
            vec!["TAX_RECEIPT_1.zip", "TAX_RECEIPT_2.zip"]
        );
        let mut entry = outer.by_name("TAX_RECEIPT_2.zip").unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, blob);
    }

    #[test]
    fn test_build_file_fails_for_missing_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("Main.zip");

        let err = build_nested_zip(&path, &[contract("C001", "01", &["a.txt"])]).unwrap_err();

        assert!(matches!(err, NestedZipError::IoError(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_build_file_overwrites_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("Main.zip");
        std::fs::write(&path, b"not an archive").unwrap();

        build_nested_zip(&path, &[contract("C001", "01", &["a.txt"])]).unwrap();

        let mut outer = open(std::fs::read(&path).unwrap());
        assert_eq!(names(&mut outer), vec!["C001_01.zip"]);
    }
}
