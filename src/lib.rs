// Library root
// -----------
// The binary (`main.rs`) parses arguments, loads the configuration and
// hands off to `ui`. Everything else is usable without a terminal.
//
// Module responsibilities:
// - `vk`: lists album photos through the VK API.
// - `select`: picks the largest variant of each photo and names it.
// - `disk`: creates the destination folder and uploads by URL on Yandex Disk.
// - `manifest`: builds and writes the list of uploaded photos.
// - `backup`: runs the whole sequence and reports per-photo results.
// - `config`, `cli`, `ui`: startup and terminal interaction.
pub mod backup;
pub mod cli;
pub mod config;
pub mod disk;
pub mod error;
pub mod manifest;
pub mod model;
pub mod select;
pub mod ui;
pub mod vk;
