//! Repository for the `games` table and its `games_genres` / `games_modes`
//! associations.
//!
//! Reads assemble full [`Game`] aggregates: one query for the game rows and
//! one batched query per association table, grouped in memory by game id.
//! Writes run in a single transaction so a failing association insert never
//! leaves a half-written game behind.

use std::collections::{BTreeMap, HashMap};

use gamecat_core::catalog::distinct_ids;
use gamecat_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{RepoError, RepoResult};
use crate::models::game::{AssociationName, Game, GameRow, GameWrite};

/// Column list for `games` queries.
const GAME_COLUMNS: &str = "\
    id, title, image_url, developers, publishers, release_date, storage, likes, \
    created_at, updated_at";

/// The two many-to-many tables hanging off `games`.
#[derive(Debug, Clone, Copy)]
enum Link {
    Genre,
    Mode,
}

impl Link {
    fn table(self) -> &'static str {
        match self {
            Link::Genre => "games_genres",
            Link::Mode => "games_modes",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Link::Genre => "genre_id",
            Link::Mode => "mode_id",
        }
    }

    fn names_query(self) -> &'static str {
        match self {
            Link::Genre => {
                "SELECT gg.game_id, g.id, g.genre_name AS name \
                 FROM games_genres gg \
                 JOIN genres g ON g.id = gg.genre_id \
                 WHERE gg.game_id = ANY($1)"
            }
            Link::Mode => {
                "SELECT gm.game_id, m.id, m.mode_name AS name \
                 FROM games_modes gm \
                 JOIN modes m ON m.id = gm.mode_id \
                 WHERE gm.game_id = ANY($1)"
            }
        }
    }
}

/// Builds and persists game aggregates.
pub struct GameRepo;

impl GameRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List every game ordered by title, with genres and modes populated.
    pub async fn list_all(pool: &PgPool) -> RepoResult<Vec<Game>> {
        let query = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY title, id");
        let rows = sqlx::query_as::<_, GameRow>(&query)
            .fetch_all(pool)
            .await
            .map_err(RepoError::Query)?;

        Self::assemble(pool, rows).await
    }

    /// Find one game by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> RepoResult<Game> {
        let query = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1");
        let row = sqlx::query_as::<_, GameRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(RepoError::Query)?
            .ok_or(RepoError::NotFound { entity: "Game", id })?;

        Self::assemble(pool, vec![row])
            .await?
            .pop()
            .ok_or(RepoError::NotFound { entity: "Game", id })
    }

    /// List the games associated with `genre_id`, ordered by title.
    ///
    /// An unknown genre simply yields no games.
    pub async fn list_by_genre(pool: &PgPool, genre_id: DbId) -> RepoResult<Vec<Game>> {
        let query = format!(
            "SELECT {GAME_COLUMNS} FROM games \
             WHERE id IN (SELECT game_id FROM games_genres WHERE genre_id = $1) \
             ORDER BY title, id"
        );
        let rows = sqlx::query_as::<_, GameRow>(&query)
            .bind(genre_id)
            .fetch_all(pool)
            .await
            .map_err(RepoError::Query)?;

        Self::assemble(pool, rows).await
    }

    /// Image store key recorded for a game.
    pub async fn find_image_key(pool: &PgPool, id: DbId) -> RepoResult<String> {
        sqlx::query_scalar::<_, String>("SELECT image_url FROM games WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(RepoError::Query)?
            .ok_or(RepoError::NotFound { entity: "Game", id })
    }

    /// Whether a game with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM games WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(RepoError::Query)
    }

    /// Image store keys for every game, keyed by game id.
    pub async fn list_image_keys(pool: &PgPool) -> RepoResult<BTreeMap<DbId, String>> {
        let rows = sqlx::query_as::<_, (DbId, String)>("SELECT id, image_url FROM games")
            .fetch_all(pool)
            .await
            .map_err(RepoError::Query)?;

        Ok(rows.into_iter().collect())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new game and its associations. Returns the assigned id.
    ///
    /// Likes start at zero whatever the caller had in mind.
    pub async fn insert(pool: &PgPool, input: &GameWrite) -> RepoResult<DbId> {
        input.validate()?;

        let mut tx = pool.begin().await.map_err(RepoError::Write)?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO games \
                 (title, image_url, developers, publishers, release_date, storage, likes, \
                  created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, 0, NOW(), NOW()) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(input.image_key())
        .bind(&input.developers)
        .bind(&input.publishers)
        .bind(input.release_date)
        .bind(input.storage)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::Write)?;

        insert_links(&mut tx, Link::Genre, id, &input.genre_ids).await?;
        insert_links(&mut tx, Link::Mode, id, &input.mode_ids).await?;

        tx.commit().await.map_err(RepoError::Write)?;

        tracing::info!(game_id = id, title = %input.title, "Game inserted");
        Ok(id)
    }

    /// Replace every field and both association sets of an existing game.
    ///
    /// Associations are replaced wholesale (delete all, then insert), not
    /// diffed. Likes are reset to zero.
    pub async fn update(pool: &PgPool, id: DbId, input: &GameWrite) -> RepoResult<()> {
        input.validate()?;

        let mut tx = pool.begin().await.map_err(RepoError::Write)?;

        let result = sqlx::query(
            "UPDATE games SET \
                 title = $2, \
                 image_url = $3, \
                 developers = $4, \
                 publishers = $5, \
                 release_date = $6, \
                 storage = $7, \
                 likes = 0, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.image_key())
        .bind(&input.developers)
        .bind(&input.publishers)
        .bind(input.release_date)
        .bind(input.storage)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::Write)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { entity: "Game", id });
        }

        replace_links(&mut tx, Link::Genre, id, &input.genre_ids).await?;
        replace_links(&mut tx, Link::Mode, id, &input.mode_ids).await?;

        tx.commit().await.map_err(RepoError::Write)?;

        tracing::info!(game_id = id, title = %input.title, "Game updated");
        Ok(())
    }

    /// Delete a game by id. Association rows go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed; a missing id is not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(RepoError::Write)?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Aggregate assembly
    // -----------------------------------------------------------------------

    /// Attach genre and mode names to each row, preserving row order.
    async fn assemble(pool: &PgPool, rows: Vec<GameRow>) -> RepoResult<Vec<Game>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut genres = load_names(pool, Link::Genre, &ids).await?;
        let mut modes = load_names(pool, Link::Mode, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let game_genres = genres.remove(&row.id).unwrap_or_default();
                let game_modes = modes.remove(&row.id).unwrap_or_default();
                Game::from_row(row, game_genres, game_modes)
            })
            .collect())
    }
}

/// Fetch `id -> name` maps for the given games, grouped by game id. Games
/// without associations are absent from the result.
async fn load_names(
    pool: &PgPool,
    link: Link,
    game_ids: &[DbId],
) -> RepoResult<HashMap<DbId, BTreeMap<DbId, String>>> {
    let rows = sqlx::query_as::<_, AssociationName>(link.names_query())
        .bind(game_ids)
        .fetch_all(pool)
        .await
        .map_err(RepoError::Query)?;

    let mut grouped: HashMap<DbId, BTreeMap<DbId, String>> = HashMap::new();
    for row in rows {
        grouped.entry(row.game_id).or_default().insert(row.id, row.name);
    }
    Ok(grouped)
}

/// Insert one association row per distinct id. Existing pairs are ignored.
async fn insert_links(
    conn: &mut PgConnection,
    link: Link,
    game_id: DbId,
    ids: &[DbId],
) -> RepoResult<()> {
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(());
    }

    let query = format!(
        "INSERT INTO {table} (game_id, {column}, created_at, updated_at) \
         SELECT $1, UNNEST($2::BIGINT[]), NOW(), NOW() \
         ON CONFLICT DO NOTHING",
        table = link.table(),
        column = link.column(),
    );
    sqlx::query(&query)
        .bind(game_id)
        .bind(&ids)
        .execute(&mut *conn)
        .await
        .map_err(RepoError::Write)?;
    Ok(())
}

/// Drop every association of `link` kind for the game, then insert `ids`.
async fn replace_links(
    conn: &mut PgConnection,
    link: Link,
    game_id: DbId,
    ids: &[DbId],
) -> RepoResult<()> {
    let query = format!("DELETE FROM {} WHERE game_id = $1", link.table());
    sqlx::query(&query)
        .bind(game_id)
        .execute(&mut *conn)
        .await
        .map_err(RepoError::Write)?;

    insert_links(conn, link, game_id, ids).await
}
