//! Built-in package catalog
//!
//! The packages provisioned when no `--catalog` file is given. Order is the
//! processing order.

use super::urls;

/// Static form of a package descriptor
#[derive(Debug, Clone, Copy)]
pub struct PackageSpec {
    pub name: &'static str,
    pub base_url: &'static str,
    pub dll_name: &'static str,
    pub dev_name: &'static str,
    pub expanded_dev_name: &'static str,
    pub version: &'static str,
}

/// SDL2 and the satellite libraries used by the win64 build
pub const BUILTIN_PACKAGES: &[PackageSpec] = &[
    PackageSpec {
        name: "SDL",
        base_url: urls::SDL_RELEASE,
        dll_name: "SDL2-%s-win32-x64.zip",
        dev_name: "SDL2-devel-%s-mingw.tar.gz",
        expanded_dev_name: "SDL2-%s",
        version: "2.0.8",
    },
    PackageSpec {
        name: "SDL_image",
        base_url: urls::SDL_IMAGE_RELEASE,
        dll_name: "SDL2_image-%s-win32-x64.zip",
        dev_name: "SDL2_image-devel-%s-mingw.tar.gz",
        expanded_dev_name: "SDL2_image-%s",
        version: "2.0.3",
    },
    PackageSpec {
        name: "SDL_ttf",
        base_url: urls::SDL_TTF_RELEASE,
        dll_name: "SDL2_ttf-%s-win32-x64.zip",
        dev_name: "SDL2_ttf-devel-%s-mingw.tar.gz",
        expanded_dev_name: "SDL2_ttf-%s",
        version: "2.0.14",
    },
];
