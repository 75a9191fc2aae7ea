use crate::seed::Catalog;
use chrono::{NaiveTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_core::hotel::LocalHotel;
use wayfare_core::profile::{Profile, Role};
use wayfare_core::review::{NewReview, Review, ReviewAuthor};
use wayfare_core::{Booking, FavoriteSet, HotelKey, HotelSource, NewBooking, MAX_STAY_DAYS};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Invalid(String),
}

pub type DbResult<T> = Result<T, DbError>;

struct UserRecord {
    profile: Profile,
    password_hash: String,
}

/// Editable fields of a local hotel.
#[derive(Debug, Clone, Default)]
pub struct HotelFields {
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: Option<String>,
    pub image_filename: Option<String>,
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, UserRecord>,
    hotels: Vec<LocalHotel>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
}

/// In-memory store behind the reference backend. One lock covers all tables
/// so multi-table checks (booking uniqueness, review targets) are atomic.
pub struct Database {
    tables: RwLock<Tables>,
    catalog: Catalog,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Database {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ---- users ----

    pub async fn insert_user(&self, email: &str, username: &str, password_hash: String, role: Role) -> DbResult<Profile> {
        let mut tables = self.tables.write().await;
        let email_key = email.to_lowercase();
        if tables.users.values().any(|u| u.profile.email.to_lowercase() == email_key) {
            return Err(DbError::Conflict("Email is already registered".to_string()));
        }
        let profile = Profile {
            id: new_id(),
            email: email.to_string(),
            username: username.to_string(),
            avatar_url: None,
            role,
            avatar_updated_at: None,
            favorites: FavoriteSet::new(),
        };
        tables.users.insert(
            profile.id.clone(),
            UserRecord {
                profile: profile.clone(),
                password_hash,
            },
        );
        Ok(profile)
    }

    /// Profile and password hash for a login attempt.
    pub async fn credentials(&self, email: &str) -> Option<(Profile, String)> {
        let tables = self.tables.read().await;
        let email = email.to_lowercase();
        tables
            .users
            .values()
            .find(|u| u.profile.email.to_lowercase() == email)
            .map(|u| (u.profile.clone(), u.password_hash.clone()))
    }

    pub async fn profile(&self, user_id: &str) -> DbResult<Profile> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(user_id)
            .map(|u| u.profile.clone())
            .ok_or_else(|| DbError::NotFound("User not found".to_string()))
    }

    pub async fn update_profile<F>(&self, user_id: &str, update: F) -> DbResult<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(user_id)
            .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;
        update(&mut user.profile);
        Ok(user.profile.clone())
    }

    /// Returns the user's full favorite list after the change.
    pub async fn set_favorite(&self, user_id: &str, hotel: &HotelKey, favorited: bool) -> DbResult<FavoriteSet> {
        let profile = self
            .update_profile(user_id, |p| {
                p.favorites = p.favorites.with(hotel, favorited);
            })
            .await?;
        Ok(profile.favorites)
    }

    // ---- local hotels ----

    pub async fn local_hotels(&self) -> Vec<LocalHotel> {
        self.tables.read().await.hotels.clone()
    }

    pub async fn local_hotel(&self, id: &str) -> DbResult<LocalHotel> {
        self.tables
            .read()
            .await
            .hotels
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| DbError::NotFound("Hotel not found".to_string()))
    }

    pub async fn insert_local_hotel(&self, fields: HotelFields) -> LocalHotel {
        let hotel = LocalHotel {
            id: new_id(),
            name: fields.name,
            location: fields.location,
            price: fields.price,
            description: fields.description,
            images: fields.image_filename.iter().cloned().collect(),
            image_filename: fields.image_filename,
        };
        self.tables.write().await.hotels.push(hotel.clone());
        hotel
    }

    /// A missing image keeps the current one.
    pub async fn update_local_hotel(&self, id: &str, fields: HotelFields) -> DbResult<LocalHotel> {
        let mut tables = self.tables.write().await;
        let hotel = tables
            .hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| DbError::NotFound("Hotel not found".to_string()))?;
        hotel.name = fields.name;
        hotel.location = fields.location;
        hotel.price = fields.price;
        hotel.description = fields.description;
        if let Some(image) = fields.image_filename {
            hotel.images.push(image.clone());
            hotel.image_filename = Some(image);
        }
        Ok(hotel.clone())
    }

    /// Removes the hotel with its reviews.
    pub async fn delete_local_hotel(&self, id: &str) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.hotels.len();
        tables.hotels.retain(|h| h.id != id);
        if tables.hotels.len() == before {
            return Err(DbError::NotFound("Hotel not found".to_string()));
        }
        tables.reviews.retain(|r| r.hotel_id.as_deref() != Some(id));
        Ok(())
    }

    // ---- bookings ----

    /// Rejects a second booking of the same hotel on the same calendar day by
    /// the same user.
    pub async fn insert_booking(&self, user_id: &str, new: &NewBooking) -> DbResult<Booking> {
        let mut tables = self.tables.write().await;

        let hotel_exists = match new.hotel_source {
            HotelSource::Local => tables.hotels.iter().any(|h| h.id == new.hotel_id),
            HotelSource::External => new
                .hotel_id
                .parse::<u64>()
                .ok()
                .and_then(|code| self.catalog.get(code))
                .is_some(),
        };
        if !hotel_exists {
            return Err(DbError::NotFound("Hotel not found".to_string()));
        }

        let check_out_day = new
            .check_out_day()
            .ok_or_else(|| DbError::Invalid(format!("Stay must be between 1 and {} nights", MAX_STAY_DAYS)))?;

        let slot = new.slot();
        if tables
            .bookings
            .iter()
            .any(|b| b.user_id.as_deref() == Some(user_id) && b.slot() == slot)
        {
            return Err(DbError::Conflict("You already booked this hotel on that day".to_string()));
        }

        let check_in_date = new.check_in_date.and_time(NaiveTime::MIN).and_utc();
        let booking = Booking {
            id: new_id(),
            hotel_id: new.hotel_id.clone(),
            hotel_source: new.hotel_source,
            user_id: Some(user_id.to_string()),
            check_in_date,
            stay_days: new.stay_days,
            check_out_date: Some(check_out_day.and_time(NaiveTime::MIN).and_utc()),
        };
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    pub async fn bookings_for(&self, user_id: &str) -> Vec<Booking> {
        let tables = self.tables.read().await;
        let mut mine: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        mine.sort_by_key(|b| b.check_in_date);
        mine
    }

    pub async fn delete_booking(&self, user_id: &str, booking_id: &str) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let idx = tables
            .bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or_else(|| DbError::NotFound("Booking not found".to_string()))?;
        if tables.bookings[idx].user_id.as_deref() != Some(user_id) {
            return Err(DbError::Forbidden("Not your booking".to_string()));
        }
        tables.bookings.remove(idx);
        Ok(())
    }

    // ---- reviews ----

    pub async fn insert_review(&self, author: ReviewAuthor, new: &NewReview) -> DbResult<Review> {
        let mut tables = self.tables.write().await;
        if !tables.hotels.iter().any(|h| h.id == new.hotel_id) {
            return Err(DbError::NotFound("Hotel not found".to_string()));
        }
        let review = Review {
            id: new_id(),
            hotel_id: Some(new.hotel_id.clone()),
            author: Some(author),
            comment: new.comment.trim().to_string(),
            rating: new.rating,
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    /// Newest first.
    pub async fn reviews_for(&self, hotel_id: &str) -> Vec<Review> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.hotel_id.as_deref() == Some(hotel_id))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    pub async fn delete_review(&self, user_id: &str, review_id: &str) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let idx = tables
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or_else(|| DbError::NotFound("Review not found".to_string()))?;
        if !tables.reviews[idx].is_authored_by(user_id) {
            return Err(DbError::Forbidden("You can only delete your own reviews".to_string()));
        }
        tables.reviews.remove(idx);
        Ok(())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(Catalog::seeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_booking(hotel_id: &str, source: HotelSource, day: u32, stay_days: u32) -> NewBooking {
        NewBooking {
            hotel_id: hotel_id.to_string(),
            hotel_source: source,
            check_in_date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            stay_days,
        }
    }

    async fn db_with_hotel() -> (Database, String) {
        let db = Database::default();
        let hotel = db
            .insert_local_hotel(HotelFields { name: "Harbour View".into(), price: 880.0, ..Default::default() })
            .await;
        (db, hotel.id)
    }

    #[tokio::test]
    async fn test_booking_uniqueness_per_user_and_day() {
        let (db, hotel_id) = db_with_hotel().await;
        db.insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 1, 2)).await.unwrap();

        let dup = db.insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 1, 5)).await;
        assert!(matches!(dup, Err(DbError::Conflict(_))));

        // Another user, another day, another source are all fine
        db.insert_booking("u2", &new_booking(&hotel_id, HotelSource::Local, 1, 2)).await.unwrap();
        db.insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 2, 2)).await.unwrap();
        db.insert_booking("u1", &new_booking("101201", HotelSource::External, 1, 2)).await.unwrap();
        assert_eq!(db.bookings_for("u1").await.len(), 3);
    }

    #[tokio::test]
    async fn test_overlong_stay_is_invalid_not_a_panic() {
        let (db, hotel_id) = db_with_hotel().await;
        let res = db.insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 1, u32::MAX)).await;
        assert!(matches!(res, Err(DbError::Invalid(_))));
        assert!(db.bookings_for("u1").await.is_empty());

        let year = db
            .insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 1, MAX_STAY_DAYS))
            .await
            .unwrap();
        assert_eq!(
            year.check_out_date.map(|d| d.date_naive()),
            NaiveDate::from_ymd_opt(2026, 7, 1)
        );
    }

    #[tokio::test]
    async fn test_booking_unknown_hotel() {
        let db = Database::default();
        let res = db.insert_booking("u1", &new_booking("999", HotelSource::External, 1, 1)).await;
        assert!(matches!(res, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_only_owner_deletes_booking() {
        let (db, hotel_id) = db_with_hotel().await;
        let b = db.insert_booking("u1", &new_booking(&hotel_id, HotelSource::Local, 1, 1)).await.unwrap();
        assert!(matches!(db.delete_booking("u2", &b.id).await, Err(DbError::Forbidden(_))));
        db.delete_booking("u1", &b.id).await.unwrap();
        assert!(matches!(db.delete_booking("u1", &b.id).await, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_deleting_hotel_drops_its_reviews() {
        let (db, hotel_id) = db_with_hotel().await;
        let author = ReviewAuthor { id: "u1".into(), username: Some("amy".into()) };
        let new = NewReview { hotel_id: hotel_id.clone(), comment: "Nice".into(), rating: 5 };
        db.insert_review(author, &new).await.unwrap();
        db.delete_local_hotel(&hotel_id).await.unwrap();
        assert!(db.reviews_for(&hotel_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::default();
        db.insert_user("amy@example.com", "amy", "h".into(), Role::User).await.unwrap();
        let res = db.insert_user("AMY@example.com", "amy2", "h".into(), Role::User).await;
        assert!(matches!(res, Err(DbError::Conflict(_))));
    }
}
