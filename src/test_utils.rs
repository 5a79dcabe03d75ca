//! Test utilities for property-based testing
//!
//! This module provides generators for proptest and builders for the
//! archives the pipeline consumes.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a dotted version string such as `2.0.14`
    pub fn version() -> impl Strategy<Value = String> {
        (0u32..10, 0u32..10, 0u32..40)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a directory-style base URL (always ends with `/`)
    pub fn base_url() -> impl Strategy<Value = String> {
        (
            prop_oneof!["https", "http"],
            "[a-z]{3,10}",
            "[a-z]{2,5}",
            proptest::collection::vec("[A-Za-z0-9_]{1,12}", 0..3),
        )
            .prop_map(|(scheme, domain, tld, segments)| {
                let mut url = format!("{scheme}://{domain}.{tld}/");
                for segment in segments {
                    url.push_str(&segment);
                    url.push('/');
                }
                url
            })
    }

    /// Generate a rendered archive file name
    pub fn archive_file_name() -> impl Strategy<Value = String> {
        (
            "[A-Za-z][A-Za-z0-9_]{0,10}",
            version(),
            prop_oneof![Just("win32-x64.zip"), Just("devel-mingw.tar.gz")],
        )
            .prop_map(|(lib, version, suffix)| format!("{lib}-{version}-{suffix}"))
    }
}

#[cfg(test)]
pub mod fixtures {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    use crate::config::defaults::MINGW_TRIPLE;
    use crate::core::package::PackageDescriptor;

    /// Write a zip archive with the given `(path, content)` entries
    pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    /// Write a tar.gz archive with the given `(path, content)` file entries
    pub fn write_tar_gz(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_path(name).unwrap();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append(&header, content.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    /// Library stem used inside a package's archives (`SDL2`, `SDL2_image`)
    pub fn library_stem(package: &PackageDescriptor) -> String {
        let expanded = package.expanded_dir();
        expanded
            .strip_suffix(&format!("-{}", package.version))
            .unwrap_or(&expanded)
            .to_string()
    }

    /// Write both archives of `package` into `upstream`, named as the
    /// upstream release would name them
    pub fn publish_package(upstream: &Path, package: &PackageDescriptor) {
        let stem = library_stem(package);
        let dll = format!("{stem}.dll");
        let readme = format!("README-{stem}.txt");
        write_zip(
            &upstream.join(package.dll_archive()),
            &[(dll.as_str(), "MZ"), (readme.as_str(), "readme")],
        );

        let base = format!("{}/{MINGW_TRIPLE}", package.expanded_dir());
        let header = stem.replacen("SDL2", "SDL", 1);
        let entries = [
            (format!("{base}/bin/{stem}.dll"), "MZ"),
            (format!("{base}/include/SDL2/{header}.h"), "/* header */"),
            (format!("{base}/lib/lib{stem}.a"), "!<arch>"),
            (format!("{base}/lib/pkgconfig/{}.pc", stem.to_lowercase()), "Name: x"),
            (format!("{base}/share/aclocal/{}.m4", stem.to_lowercase()), "dnl"),
        ];
        let borrowed: Vec<(&str, &str)> = entries.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        write_tar_gz(&upstream.join(package.dev_archive()), &borrowed);
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::generators::*;
    use crate::core::archive::ArchiveKind;
    use crate::core::catalog::Catalog;
    use proptest::prelude::*;

    #[test]
    fn test_library_stem() {
        let stems: Vec<_> = Catalog::builtin()
            .iter()
            .map(fixtures::library_stem)
            .collect();
        assert_eq!(stems, vec!["SDL2", "SDL2_image", "SDL2_ttf"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_version_generator(version in version()) {
            let parts: Vec<&str> = version.split('.').collect();
            prop_assert_eq!(parts.len(), 3);
            for part in parts {
                prop_assert!(part.parse::<u32>().is_ok());
            }
        }

        #[test]
        fn test_base_url_generator(url in base_url()) {
            prop_assert!(url.ends_with('/'));
            prop_assert!(url::Url::parse(&url).is_ok());
        }

        #[test]
        fn test_archive_file_name_generator(name in archive_file_name()) {
            prop_assert!(ArchiveKind::from_file_name(&name).is_ok());
        }
    }
}
