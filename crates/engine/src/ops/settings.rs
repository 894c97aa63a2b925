use sea_orm::{ActiveValue, prelude::*, sea_query::OnConflict};

use crate::{Amount, EngineError, MONTHLY_LIMIT, ResultEngine, settings};

use super::Engine;

impl Engine {
    /// Returns the raw value stored under `key`.
    pub async fn setting(&self, key: &str) -> ResultEngine<Option<String>> {
        let model = settings::Entity::find_by_id(key.to_string())
            .one(&self.database)
            .await?;
        Ok(model.and_then(|m| m.value))
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set_setting(&self, key: &str, value: &str) -> ResultEngine<()> {
        let active = settings::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(Some(value.to_string())),
        };
        settings::Entity::insert(active)
            .on_conflict(
                OnConflict::column(settings::Column::Key)
                    .update_column(settings::Column::Value)
                    .to_owned(),
            )
            .exec(&self.database)
            .await?;
        tracing::info!(key, value, "setting saved");
        Ok(())
    }

    /// The monthly spending limit, if one was saved.
    ///
    /// A stored value that no longer parses is reported, not ignored.
    pub async fn monthly_limit(&self) -> ResultEngine<Option<f64>> {
        let Some(raw) = self.setting(MONTHLY_LIMIT).await? else {
            return Ok(None);
        };
        let limit = Amount::parse_non_negative(&raw).map_err(|_| {
            EngineError::InvalidAmount(format!("stored {MONTHLY_LIMIT} is not a number: {raw:?}"))
        })?;
        Ok(Some(limit.value()))
    }

    /// Parses and saves the monthly limit. `0` clears it.
    pub async fn set_monthly_limit(&self, raw: &str) -> ResultEngine<f64> {
        let limit = Amount::parse_non_negative(raw)
            .inspect_err(|err| tracing::warn!("rejected monthly limit: {err}"))?;
        self.set_setting(MONTHLY_LIMIT, &limit.value().to_string())
            .await?;
        Ok(limit.value())
    }
}
