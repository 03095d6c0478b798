use sqlx::SqliteConnection;

use crate::forms::FormFields;
use crate::models::artist::Artist;
use crate::models::show::{NewShow, Show};
use crate::models::venue::Venue;
use crate::util::{input_datetime, now, parse_datetime};
use crate::validation::{self, FieldError, FormErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl Default for ShowForm {
    /// A blank form, with the start time set to the present.
    fn default() -> Self {
        Self {
            artist_id: String::new(),
            venue_id: String::new(),
            start_time: input_datetime(now()),
        }
    }
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.get("artist_id").to_owned(),
            venue_id: fields.get("venue_id").to_owned(),
            start_time: fields.get("start_time").to_owned(),
        }
    }

    pub fn from_show(show: &Show) -> Self {
        Self {
            artist_id: show.artist_id.to_string(),
            venue_id: show.venue_id.to_string(),
            start_time: input_datetime(show.start_time),
        }
    }

    /// Checks the fields on their own, without looking anything up.
    pub fn validate_fields(&self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::default();

        let artist_id = errors.check("artist_id", validation::integer(&self.artist_id));
        let venue_id = errors.check("venue_id", validation::integer(&self.venue_id));
        let start_time = errors.check(
            "start_time",
            parse_datetime(&self.start_time).ok_or(FieldError::InvalidDateTime),
        );

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }

    /// Checks the fields, then that the artist and venue both exist.
    ///
    /// The outer result is a failed lookup; the inner one is the verdict on the form.
    pub async fn validate(
        &self,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Result<NewShow, FormErrors>> {
        let mut errors = match self.validate_fields() {
            Ok(_) => FormErrors::default(),
            Err(errors) => errors,
        };

        if let Ok(artist_id) = validation::integer(&self.artist_id) {
            if !Artist::exists(artist_id, &mut *conn).await? {
                errors.add("artist_id", FieldError::DoesNotExist("artist"));
            }
        }
        if let Ok(venue_id) = validation::integer(&self.venue_id) {
            if !Venue::exists(venue_id, &mut *conn).await? {
                errors.add("venue_id", FieldError::DoesNotExist("venue"));
            }
        }

        if errors.is_empty() {
            Ok(self.validate_fields())
        } else {
            Ok(Err(errors))
        }
    }
}
