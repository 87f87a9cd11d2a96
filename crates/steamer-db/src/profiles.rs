use crate::types::{NewProfile, ProfileChanges, ProfileRow};

/// Get a profile by its row id
pub async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM steam_profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Get a profile by SteamID64
pub async fn find_by_steam_id64(
    executor: impl sqlx::PgExecutor<'_>,
    steam_id64: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM steam_profiles WHERE steam_id64 = $1")
        .bind(steam_id64)
        .fetch_optional(executor)
        .await
}

/// Get a profile by custom URL
pub async fn find_by_custom_url(
    executor: impl sqlx::PgExecutor<'_>,
    custom_url: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM steam_profiles WHERE custom_url = $1")
        .bind(custom_url)
        .fetch_optional(executor)
        .await
}

/// List profiles in insertion order
pub async fn list(
    executor: impl sqlx::PgExecutor<'_>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        "SELECT * FROM steam_profiles ORDER BY id ASC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}

/// Insert a new profile. Fails with a unique violation if the SteamID64
/// (or custom URL) is already stored.
pub async fn insert(
    executor: impl sqlx::PgExecutor<'_>,
    new: &NewProfile,
) -> Result<ProfileRow, sqlx::Error> {
    let c = &new.changes;
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO steam_profiles (
            steam_id64, custom_url, steam_id, online_state, state_message,
            privacy_state, visibility_state, avatar_icon, avatar_medium, avatar_full,
            vac_banned, trade_ban_state, is_limited_account, member_since, steam_rating,
            hours_played_2wk, headline, location, real_name, summary,
            most_played_games, "groups", last_checked
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
            $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
        )
        RETURNING *
        "#,
    )
    .bind(&new.steam_id64)
    .bind(&c.custom_url)
    .bind(&c.steam_id)
    .bind(&c.online_state)
    .bind(&c.state_message)
    .bind(&c.privacy_state)
    .bind(&c.visibility_state)
    .bind(&c.avatar_icon)
    .bind(&c.avatar_medium)
    .bind(&c.avatar_full)
    .bind(&c.vac_banned)
    .bind(&c.trade_ban_state)
    .bind(&c.is_limited_account)
    .bind(&c.member_since)
    .bind(&c.steam_rating)
    .bind(&c.hours_played_2wk)
    .bind(&c.headline)
    .bind(&c.location)
    .bind(&c.real_name)
    .bind(&c.summary)
    .bind(&c.most_played_games)
    .bind(&c.groups)
    .bind(c.last_checked)
    .fetch_one(executor)
    .await
}

/// Partially update a profile by row id; unset fields keep their value.
/// With `claim_custom_url`, `custom_url` is written as given, NULL included.
/// Returns `None` when no row has that id.
pub async fn update_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    changes: &ProfileChanges,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE steam_profiles SET
            custom_url = CASE WHEN $24 THEN $2 ELSE COALESCE($2, custom_url) END,
            steam_id = COALESCE($3, steam_id),
            online_state = COALESCE($4, online_state),
            state_message = COALESCE($5, state_message),
            privacy_state = COALESCE($6, privacy_state),
            visibility_state = COALESCE($7, visibility_state),
            avatar_icon = COALESCE($8, avatar_icon),
            avatar_medium = COALESCE($9, avatar_medium),
            avatar_full = COALESCE($10, avatar_full),
            vac_banned = COALESCE($11, vac_banned),
            trade_ban_state = COALESCE($12, trade_ban_state),
            is_limited_account = COALESCE($13, is_limited_account),
            member_since = COALESCE($14, member_since),
            steam_rating = COALESCE($15, steam_rating),
            hours_played_2wk = COALESCE($16, hours_played_2wk),
            headline = COALESCE($17, headline),
            location = COALESCE($18, location),
            real_name = COALESCE($19, real_name),
            summary = COALESCE($20, summary),
            most_played_games = COALESCE($21, most_played_games),
            "groups" = COALESCE($22, "groups"),
            last_checked = COALESCE($23, last_checked),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&changes.custom_url)
    .bind(&changes.steam_id)
    .bind(&changes.online_state)
    .bind(&changes.state_message)
    .bind(&changes.privacy_state)
    .bind(&changes.visibility_state)
    .bind(&changes.avatar_icon)
    .bind(&changes.avatar_medium)
    .bind(&changes.avatar_full)
    .bind(&changes.vac_banned)
    .bind(&changes.trade_ban_state)
    .bind(&changes.is_limited_account)
    .bind(&changes.member_since)
    .bind(&changes.steam_rating)
    .bind(&changes.hours_played_2wk)
    .bind(&changes.headline)
    .bind(&changes.location)
    .bind(&changes.real_name)
    .bind(&changes.summary)
    .bind(&changes.most_played_games)
    .bind(&changes.groups)
    .bind(changes.last_checked)
    .bind(changes.claim_custom_url)
    .fetch_optional(executor)
    .await
}

/// Clear `custom_url` on every row holding it, except `keep_id`.
/// Returns the number of rows released.
pub async fn release_custom_url(
    executor: impl sqlx::PgExecutor<'_>,
    custom_url: &str,
    keep_id: Option<i64>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE steam_profiles
        SET custom_url = NULL, updated_at = NOW()
        WHERE custom_url = $1 AND id IS DISTINCT FROM $2
        "#,
    )
    .bind(custom_url)
    .bind(keep_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Delete a profile by row id. Returns whether a row was removed.
pub async fn delete_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM steam_profiles WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
