//! Upstream release URLs

/// SDL2 release downloads
pub const SDL_RELEASE: &str = "https://www.libsdl.org/release/";

/// SDL2_image release downloads
pub const SDL_IMAGE_RELEASE: &str = "https://www.libsdl.org/projects/SDL_image/release/";

/// SDL2_ttf release downloads
pub const SDL_TTF_RELEASE: &str = "https://www.libsdl.org/projects/SDL_ttf/release/";
