use crate::error::{Result, ScaffoldError};
use crate::symbols::SymbolTable;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// How a file's content is carried to the destination.
#[derive(Debug, Clone, Copy)]
pub enum ContentMode<'a> {
	/// Bytes are copied unchanged.
	Verbatim,

	/// Each line is passed through the symbol table.
	Substitute {
		symbols: &'a SymbolTable,
		quote_if_contains_whitespace: bool,
	},
}

/// Copy `source` to `destination`, line by line, applying `mode`.
///
/// Lines are split on `\n` and keep their terminator, so CRLF endings and a
/// missing final newline survive unchanged. Both handles are closed on every
/// return path.
pub fn write_file(source: &Path, destination: &Path, mode: ContentMode<'_>) -> Result<()> {
	let read_error = |source_err: std::io::Error| ScaffoldError::ReadFile {
		path: source.to_path_buf(),
		source: source_err,
	};
	let write_error = |source_err: std::io::Error| ScaffoldError::WriteFile {
		path: destination.to_path_buf(),
		source: source_err,
	};

	let mut reader = BufReader::new(File::open(source).map_err(read_error)?);
	let mut writer = BufWriter::new(File::create(destination).map_err(write_error)?);

	let mut line = Vec::new();
	loop {
		line.clear();
		if reader.read_until(b'\n', &mut line).map_err(read_error)? == 0 {
			break;
		}

		let written = match mode {
			ContentMode::Verbatim => writer.write_all(&line),
			ContentMode::Substitute {
				symbols,
				quote_if_contains_whitespace,
			} => writer.write_all(&symbols.rewrite_bytes(&line, quote_if_contains_whitespace)),
		};
		written.map_err(write_error)?;
	}

	writer.flush().map_err(write_error)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::symbols::Symbol;
	use std::fs;

	fn table() -> SymbolTable {
		let mut table = SymbolTable::new();
		table.bind(Symbol::ProductName, "MyApp");
		table.bind(Symbol::OrganizationName, "Rocket Insights, Inc.");
		table
	}

	#[test]
	fn test_substitute_each_line() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("in.swift");
		let dst = temp_dir.path().join("out.swift");
		fs::write(&src, "// __PRODUCT_NAME__\r\n// (c) __ORGANIZATION_NAME__\nno newline __PRODUCT_NAME__").unwrap();

		let symbols = table();
		write_file(
			&src,
			&dst,
			ContentMode::Substitute {
				symbols: &symbols,
				quote_if_contains_whitespace: false,
			},
		)
		.unwrap();

		assert_eq!(
			fs::read_to_string(&dst).unwrap(),
			"// MyApp\r\n// (c) Rocket Insights, Inc.\nno newline MyApp"
		);
	}

	#[test]
	fn test_substitute_quoted() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("project.pbxproj");
		let dst = temp_dir.path().join("out.pbxproj");
		fs::write(&src, "ORGANIZATIONNAME = __ORGANIZATION_NAME__;\nPRODUCT = __PRODUCT_NAME__;\n").unwrap();

		let symbols = table();
		write_file(
			&src,
			&dst,
			ContentMode::Substitute {
				symbols: &symbols,
				quote_if_contains_whitespace: true,
			},
		)
		.unwrap();

		assert_eq!(
			fs::read_to_string(&dst).unwrap(),
			"ORGANIZATIONNAME = \"Rocket Insights, Inc.\";\nPRODUCT = MyApp;\n"
		);
	}

	#[test]
	fn test_verbatim_copies_bytes() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("asset.bin");
		let dst = temp_dir.path().join("asset.out");
		let bytes = b"\x89PNG\r\n\x1a\n__PRODUCT_NAME__\x00\xff".to_vec();
		fs::write(&src, &bytes).unwrap();

		write_file(&src, &dst, ContentMode::Verbatim).unwrap();

		assert_eq!(fs::read(&dst).unwrap(), bytes);
	}

	#[test]
	fn test_missing_source_is_read_error() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("missing.txt");
		let dst = temp_dir.path().join("out.txt");

		match write_file(&src, &dst, ContentMode::Verbatim).unwrap_err() {
			ScaffoldError::ReadFile { path, .. } => assert_eq!(path, src),
			other => panic!("Expected ReadFile error, got {other:?}"),
		}
		assert!(!dst.exists());
	}

	#[test]
	fn test_unwritable_destination_is_write_error() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("in.txt");
		fs::write(&src, "hello\n").unwrap();
		let dst = temp_dir.path().join("no-such-dir").join("out.txt");

		match write_file(&src, &dst, ContentMode::Verbatim).unwrap_err() {
			ScaffoldError::WriteFile { path, .. } => assert_eq!(path, dst),
			other => panic!("Expected WriteFile error, got {other:?}"),
		}
	}
}
