//! Template materialization for scaffold.
//!
//! This module handles:
//! - Walking the template tree and pruning skipped directories
//! - Renaming paths through the symbol table
//! - Writing substituted or verbatim file content

pub mod writer;

pub use writer::{ContentMode, write_file};

use crate::error::{Result, ScaffoldError};
use crate::policy::Policy;
use crate::symbols::SymbolTable;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What a materialization run produced.
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
	/// Destination paths of every written file, in walk order.
	pub written: Vec<PathBuf>,

	/// Destination paths of files copied without substitution.
	pub verbatim: Vec<PathBuf>,

	/// Template-relative paths of pruned directories and skipped files.
	pub skipped: Vec<PathBuf>,
}

/// Produces a destination tree from a template tree and a symbol table.
#[derive(Debug)]
pub struct Materializer<'a> {
	source_root: PathBuf,
	dest_root: PathBuf,
	symbols: &'a SymbolTable,
	policy: &'a Policy,
}

impl<'a> Materializer<'a> {
	pub fn new(
		source_root: impl Into<PathBuf>,
		dest_root: impl Into<PathBuf>,
		symbols: &'a SymbolTable,
		policy: &'a Policy,
	) -> Self {
		Self {
			source_root: source_root.into(),
			dest_root: dest_root.into(),
			symbols,
			policy,
		}
	}

	/// Walk the template depth-first and write every file that survives the
	/// skip policy. The first I/O error aborts the run; files already written
	/// are left in place.
	pub fn run(&self) -> Result<MaterializeReport> {
		if !self.source_root.is_dir() {
			return Err(ScaffoldError::ReadFile {
				path: self.source_root.clone(),
				source: std::io::Error::new(
					std::io::ErrorKind::InvalidInput,
					"template root is not a directory",
				),
			});
		}

		log::info!("Materializing {}", self.source_root.display());

		let mut report = MaterializeReport::default();
		let mut entries = WalkDir::new(&self.source_root)
			.follow_links(false)
			.sort_by_file_name()
			.into_iter();

		while let Some(entry) = entries.next() {
			let entry = entry.map_err(|source| ScaffoldError::Walk { source })?;
			let name = entry.file_name().to_string_lossy();
			let relative = relative_path(&entry);

			if entry.file_type().is_dir() {
				if self.policy.skips_dir(&name) {
					log::debug!("Skipping directory {}", relative.display());
					entries.skip_current_dir();
					report.skipped.push(relative);
				}
				continue;
			}

			// Links to directories are neither followed nor copied
			if entry.path_is_symlink() && entry.path().is_dir() {
				log::debug!("Skipping directory link {}", relative.display());
				report.skipped.push(relative);
				continue;
			}

			if self.policy.skips_file(&name) {
				log::debug!("Skipping file {}", relative.display());
				report.skipped.push(relative);
				continue;
			}

			let destination = self.destination_path(&relative);
			let verbatim = self.policy.copies_verbatim(&name);
			self.materialize_file(entry.path(), &destination, &name, verbatim)?;
			if verbatim {
				report.verbatim.push(destination.clone());
			}
			report.written.push(destination);
		}

		Ok(report)
	}

	fn materialize_file(
		&self,
		source: &Path,
		destination: &Path,
		name: &str,
		verbatim: bool,
	) -> Result<()> {
		if let Some(parent) = destination.parent() {
			std::fs::create_dir_all(parent).map_err(|source| ScaffoldError::CreateDir {
				path: parent.to_path_buf(),
				source,
			})?;
		}

		let mode = if verbatim {
			ContentMode::Verbatim
		} else {
			ContentMode::Substitute {
				symbols: self.symbols,
				quote_if_contains_whitespace: self.policy.quotes_values_in(name),
			}
		};

		log::info!("Writing {}", destination.display());
		write_file(source, destination, mode)
	}

	/// Rename every component of a template-relative path. Never quoted.
	pub fn destination_path(&self, relative: &Path) -> PathBuf {
		let renamed: PathBuf = relative
			.components()
			.map(|component| {
				let part = component.as_os_str();
				match part.to_str() {
					Some(part) => OsString::from(self.symbols.rewrite(part, false)),
					None => part.to_os_string(),
				}
			})
			.collect();
		self.dest_root.join(renamed)
	}
}

/// The entry's path relative to the walk root.
fn relative_path(entry: &DirEntry) -> PathBuf {
	let components: Vec<Component<'_>> = entry.path().components().collect();
	let start = components.len().saturating_sub(entry.depth());
	components[start..].iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::symbols::Symbol;
	use std::collections::BTreeMap;
	use std::fs;

	/// Write a template tree from (relative path, content) pairs.
	fn write_tree(root: &Path, files: &[(&str, &str)]) {
		for (relative, content) in files {
			let path = root.join(relative);
			fs::create_dir_all(path.parent().unwrap()).unwrap();
			fs::write(path, content).unwrap();
		}
	}

	/// Read every file under `root` keyed by its relative path.
	fn read_tree(root: &Path) -> BTreeMap<String, String> {
		WalkDir::new(root)
			.into_iter()
			.map(|e| e.unwrap())
			.filter(|e| e.file_type().is_file())
			.map(|e| {
				let relative = e.path().strip_prefix(root).unwrap();
				(
					relative.to_string_lossy().replace('\\', "/"),
					fs::read_to_string(e.path()).unwrap(),
				)
			})
			.collect()
	}

	fn symbols() -> SymbolTable {
		let mut table = SymbolTable::new();
		table.bind(Symbol::ProductName, "Sample");
		table.bind(Symbol::OrganizationName, "Rocket Insights, Inc.");
		table
	}

	fn run(files: &[(&str, &str)], symbols: &SymbolTable) -> (tempfile::TempDir, MaterializeReport) {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("__PRODUCT_NAME__");
		let dst = temp_dir.path().join("out");
		fs::create_dir_all(&src).unwrap();
		write_tree(&src, files);

		let policy = Policy::default();
		let report = Materializer::new(&src, &dst, symbols, &policy)
			.run()
			.unwrap();
		(temp_dir, report)
	}

	#[test]
	fn test_end_to_end_pbxproj() {
		let (temp_dir, report) = run(
			&[(
				"__PRODUCT_NAME__.xcodeproj/project.pbxproj",
				"ORGANIZATIONNAME = __ORGANIZATION_NAME__;",
			)],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(tree.len(), 1);
		assert_eq!(
			tree["Sample.xcodeproj/project.pbxproj"],
			"ORGANIZATIONNAME = \"Rocket Insights, Inc.\";"
		);
		assert_eq!(report.written.len(), 1);
		assert!(report.verbatim.is_empty());
	}

	#[test]
	fn test_path_renaming() {
		let (temp_dir, _) = run(
			&[("__PRODUCT_NAME__/AppDelegate.swift", "class AppDelegate {}\n")],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert!(tree.contains_key("Sample/AppDelegate.swift"));
		assert!(!tree.keys().any(|k| k.contains("__PRODUCT_NAME__")));
	}

	#[test]
	fn test_path_renaming_is_never_quoted() {
		let mut table = SymbolTable::new();
		table.bind(Symbol::ProductName, "My App");
		let (temp_dir, _) = run(&[("__PRODUCT_NAME__/project.pbxproj", "")], &table);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert!(tree.contains_key("My App/project.pbxproj"));
	}

	#[test]
	fn test_content_outside_quote_set_is_not_quoted() {
		let (temp_dir, _) = run(
			&[("Sources/main.swift", "// Copyright __ORGANIZATION_NAME__\n")],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(
			tree["Sources/main.swift"],
			"// Copyright Rocket Insights, Inc.\n"
		);
	}

	#[test]
	fn test_pruned_directory_excludes_descendants() {
		let (temp_dir, report) = run(
			&[
				("xcuserdata/secret.txt", "top"),
				("App.xcodeproj/xcuserdata/jane.xcuserdatad/secret.txt", "nested"),
				("App.xcodeproj/project.pbxproj", "kept"),
			],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(tree.len(), 1);
		assert!(tree.contains_key("App.xcodeproj/project.pbxproj"));
		assert!(!tree.keys().any(|k| k.contains("xcuserdata") || k.contains("secret.txt")));
		assert_eq!(report.skipped.len(), 2);
	}

	#[test]
	fn test_skipped_files_are_omitted() {
		let (temp_dir, report) = run(
			&[
				(".DS_Store", "junk"),
				("Sub/.DS_Store", "junk"),
				("Podfile.lock", "lock"),
				("Podfile", "platform :ios"),
			],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Podfile"]);
		assert_eq!(report.skipped.len(), 3);
	}

	#[test]
	fn test_content_exemption_copies_bytes() {
		let content = "<string>__ORGANIZATION_NAME__ __PRODUCT_NAME__</string>\n";
		let (temp_dir, report) = run(
			&[("__PRODUCT_NAME__.xcodeproj/xcshareddata/IDETemplateMacros.plist", content)],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(
			tree["Sample.xcodeproj/xcshareddata/IDETemplateMacros.plist"],
			content
		);
		assert_eq!(report.verbatim.len(), 1);
	}

	#[test]
	fn test_unbound_markers_pass_through() {
		let (temp_dir, _) = run(
			&[("__AUTHOR__/notes.txt", "by __AUTHOR__ for __PRODUCT_NAME__\n")],
			&symbols(),
		);

		let tree = read_tree(&temp_dir.path().join("out"));
		assert_eq!(
			tree["__AUTHOR__/notes.txt"],
			"by __AUTHOR__ for Sample\n"
		);
	}

	#[test]
	fn test_empty_directories_are_not_created() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("template");
		let dst = temp_dir.path().join("out");
		fs::create_dir_all(src.join("Empty")).unwrap();
		fs::write(src.join("README.md"), "# __PRODUCT_NAME__\n").unwrap();

		let table = symbols();
		let policy = Policy::default();
		Materializer::new(&src, &dst, &table, &policy).run().unwrap();

		assert!(!dst.join("Empty").exists());
		assert_eq!(fs::read_to_string(dst.join("README.md")).unwrap(), "# Sample\n");
	}

	#[test]
	fn test_existing_destination_is_reused() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("template");
		let dst = temp_dir.path().join("out");
		fs::create_dir_all(src.join("__PRODUCT_NAME__")).unwrap();
		fs::write(src.join("__PRODUCT_NAME__/a.txt"), "a").unwrap();
		fs::create_dir_all(dst.join("Sample")).unwrap();

		let table = symbols();
		let policy = Policy::default();
		Materializer::new(&src, &dst, &table, &policy).run().unwrap();

		assert_eq!(fs::read_to_string(dst.join("Sample/a.txt")).unwrap(), "a");
	}

	#[test]
	fn test_io_failure_mid_walk_aborts_run() {
		let temp_dir = tempfile::tempdir().unwrap();
		let src = temp_dir.path().join("template");
		let dst = temp_dir.path().join("out");
		write_tree(
			&src,
			&[("a.txt", "first"), ("b/c.txt", "blocked"), ("d.txt", "last")],
		);
		// A regular file where the `b` directory must go
		fs::create_dir_all(&dst).unwrap();
		fs::write(dst.join("b"), "in the way").unwrap();

		let table = symbols();
		let policy = Policy::default();
		let result = Materializer::new(&src, &dst, &table, &policy).run();

		assert!(matches!(
			result,
			Err(ScaffoldError::CreateDir { .. } | ScaffoldError::WriteFile { .. })
		));
		assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "first");
		assert!(!dst.join("d.txt").exists());
	}

	#[test]
	fn test_missing_template_root_fails() {
		let temp_dir = tempfile::tempdir().unwrap();
		let table = symbols();
		let policy = Policy::default();
		let result = Materializer::new(
			temp_dir.path().join("missing"),
			temp_dir.path().join("out"),
			&table,
			&policy,
		)
		.run();

		assert!(matches!(result, Err(ScaffoldError::ReadFile { .. })));
	}

	#[test]
	fn test_destination_path() {
		let table = symbols();
		let policy = Policy::default();
		let materializer = Materializer::new("/tpl", "/dst", &table, &policy);
		assert_eq!(
			materializer.destination_path(Path::new("__PRODUCT_NAME__/--PRODUCT-NAME--Tests.swift")),
			PathBuf::from("/dst/Sample/SampleTests.swift")
		);
	}
}
