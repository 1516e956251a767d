//! Natural object types, derived from the source file extension.

use std::path::Path;

/// The kind of a Natural source object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaturalFileType {
    Program,
    Subprogram,
    Subroutine,
    Helproutine,
    Copycode,
    Function,
    Map,
    Lda,
    Pda,
    Gda,
    Ddm,
}

impl NaturalFileType {
    pub const ALL: [NaturalFileType; 11] = [
        NaturalFileType::Program,
        NaturalFileType::Subprogram,
        NaturalFileType::Subroutine,
        NaturalFileType::Helproutine,
        NaturalFileType::Copycode,
        NaturalFileType::Function,
        NaturalFileType::Map,
        NaturalFileType::Lda,
        NaturalFileType::Pda,
        NaturalFileType::Gda,
        NaturalFileType::Ddm,
    ];

    /// Extension (without dot, upper case) used on disk
    pub fn extension(self) -> &'static str {
        match self {
            NaturalFileType::Program => "NSP",
            NaturalFileType::Subprogram => "NSN",
            NaturalFileType::Subroutine => "NSS",
            NaturalFileType::Helproutine => "NSH",
            NaturalFileType::Copycode => "NSC",
            NaturalFileType::Function => "NS7",
            NaturalFileType::Map => "NSM",
            NaturalFileType::Lda => "NSL",
            NaturalFileType::Pda => "NSA",
            NaturalFileType::Gda => "NSG",
            NaturalFileType::Ddm => "NSD",
        }
    }

    /// Classify an extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.extension().eq_ignore_ascii_case(ext))
    }

    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Data areas are imported into other modules via `USING`
    pub fn is_data_area(self) -> bool {
        matches!(
            self,
            NaturalFileType::Lda | NaturalFileType::Pda | NaturalFileType::Gda
        )
    }

    /// Whether the referable name comes from a `DEFINE SUBROUTINE`/`DEFINE FUNCTION`
    /// header instead of the file name
    pub fn has_header_name(self) -> bool {
        matches!(self, NaturalFileType::Subroutine | NaturalFileType::Function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case("NSP", NaturalFileType::Program)]
    #[case("nsn", NaturalFileType::Subprogram)]
    #[case("NSS", NaturalFileType::Subroutine)]
    #[case("Nsc", NaturalFileType::Copycode)]
    #[case("NS7", NaturalFileType::Function)]
    #[case("NSL", NaturalFileType::Lda)]
    fn test_from_extension(#[case] ext: &str, #[case] expected: NaturalFileType) {
        assert_eq!(NaturalFileType::from_extension(ext), Some(expected));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(NaturalFileType::from_extension("txt"), None);
        assert_eq!(NaturalFileType::from_path(&PathBuf::from("README")), None);
    }

    #[test]
    fn test_from_path() {
        let path = PathBuf::from("Natural-Libraries/LIB1/SUB.NSN");
        assert_eq!(
            NaturalFileType::from_path(&path),
            Some(NaturalFileType::Subprogram)
        );
    }
}
