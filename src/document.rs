//! 待识别文档的类型检测
//!
//! 只检查扩展名和文件头，页面解码不在这里进行

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 支持的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Epub,
}

impl DocumentKind {
    /// 根据扩展名判断类型（不区分大小写）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "epub" => Some(DocumentKind::Epub),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Epub => "EPUB",
        }
    }

    /// 文件头签名，EPUB 是 ZIP 容器
    fn signature(self) -> &'static [u8] {
        match self {
            DocumentKind::Pdf => b"%PDF-",
            DocumentKind::Epub => b"PK\x03\x04",
        }
    }
}

/// 已打开的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    kind: DocumentKind,
}

impl Document {
    /// 打开文档并校验文件头
    ///
    /// # 参数
    ///
    /// * `path` - 文档路径，扩展名须为 `.pdf` 或 `.epub`
    ///
    /// # 返回值
    ///
    /// 扩展名不支持、文件无法读取或文件头不符时返回错误
    pub fn open(path: &Path) -> Result<Self> {
        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;

        let signature = kind.signature();
        let mut header = Vec::with_capacity(signature.len());
        File::open(path)?
            .take(signature.len() as u64)
            .read_to_end(&mut header)?;

        if header != signature {
            return Err(Error::SignatureMismatch {
                path: path.to_path_buf(),
                kind: kind.name(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// 用于窗口标题的文件名
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a.pdf")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("B.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("c.Epub")), Some(DocumentKind::Epub));
        assert_eq!(DocumentKind::from_path(Path::new("d.txt")), None);
        assert_eq!(DocumentKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_open_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, b"%PDF-1.7\n%...").unwrap();

        let doc = Document::open(&path).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Pdf);
        assert_eq!(doc.path(), path.as_path());
        assert_eq!(doc.file_name(), "scan.pdf");
    }

    #[test]
    fn test_open_epub() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.epub");
        fs::write(&path, b"PK\x03\x04\x14\x00\x00\x00mimetypeapplication/epub+zip").unwrap();

        assert_eq!(Document::open(&path).unwrap().kind(), DocumentKind::Epub);
    }

    #[test]
    fn test_signature_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            Document::open(&path),
            Err(Error::SignatureMismatch { kind: "PDF", .. })
        ));
    }

    #[test]
    fn test_short_file_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.epub");
        fs::write(&path, b"PK").unwrap();

        assert!(matches!(
            Document::open(&path),
            Err(Error::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"%PDF-").unwrap();

        assert!(matches!(Document::open(&path), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Document::open(&dir.path().join("missing.pdf")),
            Err(Error::Io(_))
        ));
    }
}
