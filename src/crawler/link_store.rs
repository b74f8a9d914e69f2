use crate::error::Result;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only log of discovered recipe URLs, one per line.
///
/// The store never removes or deduplicates; callers check [`contains`]
/// before calling [`append`].
///
/// [`contains`]: LinkStore::contains
/// [`append`]: LinkStore::append
pub struct LinkStore {
    path: PathBuf,
    links: Vec<String>,
    known: HashSet<String>,
    file: Option<File>,
}

impl LinkStore {
    /// Open the store at `path`, loading everything persisted so far. A
    /// missing file is an empty store. A trailing line left without its
    /// newline by an interrupted write is cut off so later appends start on
    /// a fresh line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = read_or_empty(&path)?;

        let complete = content.rfind('\n').map(|i| i + 1).unwrap_or(0);
        if complete < content.len() {
            warn!(
                "Dropping partial line at end of {}: {:?}",
                path.display(),
                &content[complete..]
            );
            OpenOptions::new()
                .write(true)
                .open(&path)?
                .set_len(complete as u64)?;
        }

        let links = parse_lines(&content);
        let known = links.iter().cloned().collect();
        debug!("Loaded {} links from {}", links.len(), path.display());

        Ok(Self {
            path,
            links,
            known,
            file: None,
        })
    }

    /// All persisted URLs in file order. A missing file yields an empty list.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<String>> {
        Ok(parse_lines(&read_or_empty(path.as_ref())?))
    }

    /// Persisted URLs in lines `[start, stop)`, or `[start, ..)` when `stop`
    /// is `None`.
    pub fn load_range(
        path: impl AsRef<Path>,
        start: usize,
        stop: Option<usize>,
    ) -> Result<Vec<String>> {
        let links = Self::load(path)?;
        let stop = stop.unwrap_or(links.len()).min(links.len());
        if start >= stop {
            return Ok(Vec::new());
        }
        Ok(links[start..stop].to_vec())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// URLs loaded at open plus everything appended since, in order.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.known.contains(url)
    }

    /// Persist one URL. Once this returns, a fresh [`LinkStore::load`]
    /// includes it.
    pub fn append(&mut self, url: &str) -> Result<()> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }

        if let Some(file) = self.file.as_mut() {
            file.write_all(format!("{url}\n").as_bytes())?;
        }

        self.links.push(url.to_string());
        self.known.insert(url.to_string());
        Ok(())
    }
}

fn read_or_empty(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Complete, non-blank lines only.
fn parse_lines(content: &str) -> Vec<String> {
    content
        .split_inclusive('\n')
        .filter(|line| line.ends_with('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        assert!(LinkStore::load(&path).unwrap().is_empty());
        let store = LinkStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");

        let mut store = LinkStore::open(&path).unwrap();
        store.append("https://example.com/recipe/1/").unwrap();
        store.append("https://example.com/recipe/2/").unwrap();
        assert!(store.contains("https://example.com/recipe/1/"));
        assert!(!store.contains("https://example.com/recipe/3/"));

        assert_eq!(
            LinkStore::load(&path).unwrap(),
            vec![
                "https://example.com/recipe/1/".to_string(),
                "https://example.com/recipe/2/".to_string()
            ]
        );
    }

    #[test]
    fn test_partial_trailing_line_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        fs::write(&path, "https://example.com/a\nhttps://exam").unwrap();

        assert_eq!(
            LinkStore::load(&path).unwrap(),
            vec!["https://example.com/a".to_string()]
        );

        let mut store = LinkStore::open(&path).unwrap();
        assert_eq!(store.len(), 1);
        store.append("https://example.com/b").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "https://example.com/a\nhttps://example.com/b\n"
        );
    }

    #[test]
    fn test_load_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        fs::write(&path, "a\nb\nc\nd\n").unwrap();

        assert_eq!(LinkStore::load_range(&path, 1, Some(3)).unwrap(), vec!["b", "c"]);
        assert_eq!(LinkStore::load_range(&path, 2, None).unwrap(), vec!["c", "d"]);
        assert_eq!(LinkStore::load_range(&path, 3, Some(10)).unwrap(), vec!["d"]);
        assert!(LinkStore::load_range(&path, 5, None).unwrap().is_empty());
    }
}
