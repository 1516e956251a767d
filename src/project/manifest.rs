//! The `_naturalBuild` build manifest: libraries and their steplibs.
//!
//! ```xml
//! <BuildDescription>
//!   <LibrarySteplibs>
//!     <LibrarySteplib>
//!       <Library>LIB1</Library>
//!       <Steplibs><Steplib>LIB2</Steplib></Steplibs>
//!     </LibrarySteplib>
//!   </LibrarySteplibs>
//! </BuildDescription>
//! ```

use std::path::Path;

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::Event;
use smol_str::SmolStr;

use super::error::{ManifestError, ProjectError};
use crate::base::constants::BUILD_MANIFEST;

/// Declared libraries in manifest order, each with its ordered steplibs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildManifest {
    libraries: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl BuildManifest {
    /// Read `<root>/_naturalBuild`; a missing manifest is an empty one.
    pub fn load(root: &Path) -> Result<Self, ProjectError> {
        let path = root.join(BUILD_MANIFEST);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let xml = std::fs::read_to_string(&path)?;
        Self::parse(&xml).map_err(|source| ProjectError::manifest(&path, source))
    }

    pub fn parse(xml: &str) -> Result<Self, ManifestError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut manifest = Self::default();
        let mut current_tag: Option<String> = None;
        let mut library: Option<SmolStr> = None;
        let mut steplibs: Vec<SmolStr> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if tag == "LibrarySteplib" {
                        library = None;
                        steplibs.clear();
                    }
                    current_tag = Some(tag);
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|source| ManifestError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    let name = SmolStr::new(text.trim().to_ascii_uppercase());
                    match current_tag.as_deref() {
                        Some("Library") => library = Some(name),
                        Some("Steplib") => steplibs.push(name),
                        _ => {}
                    }
                }
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"LibrarySteplib" {
                        if let Some(name) = library.take() {
                            manifest
                                .libraries
                                .insert(name, std::mem::take(&mut steplibs));
                        }
                    }
                    current_tag = None;
                }
                Ok(Event::Eof) => break,
                Err(source) => {
                    return Err(ManifestError::Xml {
                        position: reader.error_position(),
                        source,
                    });
                }
                _ => {}
            }
        }

        Ok(manifest)
    }

    /// Declared steplibs of `library`, empty if it is not in the manifest
    pub fn steplibs(&self, library: &str) -> &[SmolStr] {
        self.libraries
            .get(library.to_ascii_uppercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn libraries(&self) -> impl Iterator<Item = &SmolStr> {
        self.libraries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}
