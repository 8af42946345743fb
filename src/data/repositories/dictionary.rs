use std::path::Path;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::Text;

use crate::data::models::{Attachment, LookupError, MetaRow, RawEntry};
use crate::features::redirect::EntrySource;
use crate::schema::{mdd, meta};

// Without an index declared `COLLATE NOCASE` on `mdx(entry)` this is a full
// table scan per lookup and per redirect hop.
const FIND_ENTRIES_SQL: &str = "SELECT entry, paraphrase FROM mdx WHERE entry = ? COLLATE NOCASE";

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Opens a connection pool over an exported dictionary database.
pub fn open_pool(path: &Path, size: u32) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(path.to_string_lossy());
    Pool::builder().max_size(size.max(1)).build(manager)
}

pub struct DictionaryRepository;

impl DictionaryRepository {
    pub fn find_entries(
        conn: &mut SqliteConnection,
        key: &str,
    ) -> Result<Vec<RawEntry>, diesel::result::Error> {
        diesel::sql_query(FIND_ENTRIES_SQL)
            .bind::<Text, _>(key)
            .load::<RawEntry>(conn)
    }

    pub fn find_attachment(
        conn: &mut SqliteConnection,
        key: &str,
        case_insensitive: bool,
    ) -> Result<Option<Vec<u8>>, diesel::result::Error> {
        if case_insensitive {
            return diesel::sql_query("SELECT file FROM mdd WHERE entry = ? COLLATE NOCASE LIMIT 1")
                .bind::<Text, _>(key)
                .get_result::<Attachment>(conn)
                .optional()
                .map(|found| found.map(|attachment| attachment.data));
        }

        mdd::table
            .filter(mdd::entry.eq(key))
            .select(mdd::file)
            .first::<Vec<u8>>(conn)
            .optional()
    }

    pub fn list_meta(conn: &mut SqliteConnection) -> Result<Vec<MetaRow>, diesel::result::Error> {
        meta::table
            .select((meta::key, meta::value))
            .load::<MetaRow>(conn)
    }
}

/// Read-only view over one dictionary: the entry database plus an optional
/// attachment database.
pub struct DictionaryStore {
    name: String,
    entries: DbPool,
    attachments: Option<DbPool>,
    attachment_nocase: bool,
}

impl DictionaryStore {
    pub fn new(
        name: impl Into<String>,
        entries: DbPool,
        attachments: Option<DbPool>,
        attachment_nocase: bool,
    ) -> Self {
        Self {
            name: name.into(),
            entries,
            attachments,
            attachment_nocase,
        }
    }

    pub fn lookup_entries(&self, key: &str) -> Result<Vec<RawEntry>, LookupError> {
        let mut conn = self.entries.get().map_err(|e| {
            log::error!("Failed to check out entry connection: {}", e);
            LookupError::from(e)
        })?;

        DictionaryRepository::find_entries(&mut conn, key).map_err(|e| {
            log::error!("Entry lookup for {:?} failed: {}", key, e);
            LookupError::from(e)
        })
    }

    pub fn lookup_attachment(&self, key: &str) -> Result<Vec<u8>, LookupError> {
        let pool = self
            .attachments
            .as_ref()
            .ok_or(LookupError::AttachmentStoreNotConfigured)?;

        let mut conn = pool.get().map_err(|e| {
            log::error!("Failed to check out attachment connection: {}", e);
            LookupError::from(e)
        })?;

        DictionaryRepository::find_attachment(&mut conn, key, self.attachment_nocase)
            .map_err(|e| {
                log::error!("Attachment lookup for {:?} failed: {}", key, e);
                LookupError::from(e)
            })?
            .ok_or_else(|| LookupError::AttachmentNotFound(key.to_string()))
    }

    /// Metadata rows, led by the configured display name.
    pub fn list_metadata(&self) -> Result<Vec<MetaRow>, LookupError> {
        let mut conn = self.entries.get().map_err(|e| {
            log::error!("Failed to check out metadata connection: {}", e);
            LookupError::from(e)
        })?;
        let rows = DictionaryRepository::list_meta(&mut conn).map_err(|e| {
            log::error!("Failed to read dictionary metadata: {}", e);
            LookupError::from(e)
        })?;

        let mut metadata = Vec::with_capacity(rows.len() + 1);
        metadata.push(MetaRow::new("customName", self.name.as_str()));
        metadata.extend(rows);
        Ok(metadata)
    }
}

impl EntrySource for DictionaryStore {
    fn lookup_entries(&self, key: &str) -> Result<Vec<RawEntry>, LookupError> {
        DictionaryStore::lookup_entries(self, key)
    }
}
