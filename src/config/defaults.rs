//! Default configuration values

/// Output directory receiving the runtime DLLs, relative to the project root
pub const OUT_DIR: &str = "out/win64";

/// Vendor cache holding downloaded archives and their expansions
pub const VENDOR_DIR: &str = "vendor/sdl";

/// Cross-compiler target triple
pub const MINGW_TRIPLE: &str = "x86_64-w64-mingw32";

/// Cross-compiler system prefix receiving development files
pub const MINGW_PREFIX: &str = "/usr/x86_64-w64-mingw32";

/// Subdirectories of a development archive copied into the prefix, in order
pub const DEV_SUBDIRS: &[&str] = &["bin", "include", "lib", "share"];

/// Extension of runtime libraries placed into the output directory
pub const DLL_EXTENSION: &str = "dll";

/// Placeholder substituted with the package version in name templates
pub const VERSION_PLACEHOLDER: &str = "%s";

/// Permissions for directories created by the provisioner (before umask)
pub const DIR_MODE: u32 = 0o777;

/// Connect timeout for native downloads, in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// External download tool
pub const WGET: &str = "wget";

/// External zip extraction tool
pub const UNZIP: &str = "unzip";

/// External tar extraction tool
pub const TAR: &str = "tar";

/// External copy tool
pub const CP: &str = "cp";

/// Privilege elevation wrapper for writes into the system prefix
pub const SUDO: &str = "sudo";
