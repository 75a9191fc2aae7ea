use serde::{Deserialize, Serialize};

/// Display language for user-facing messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-HK", alias = "zh-hk", alias = "zh")]
    ZhHk,
}

/// Every message a view can surface. Errors are shown as text, never as codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Message {
    HotelNotSelected,
    CheckInMissing,
    StayTooShort,
    StayTooLong,
    DuplicateBooking,
    LoginRequired,
    BookingSucceeded,
    BookingFailed,
    BookingCancelFailed,
    ReviewCommentEmpty,
    ReviewRatingOutOfRange,
    ReviewSubmitted,
    ReviewFailed,
    ReviewDeleteFailed,
    ReviewsLoadFailed,
    SearchCityMissing,
    SearchDatesMissing,
    CheckOutNotAfterCheckIn,
    FavoriteFailed,
    LoginFailed,
    RegisterFailed,
    ProfileUpdateFailed,
    AvatarUploadFailed,
    AvatarMissing,
    HotelLoadFailed,
    HotelNotFound,
    NoFavorites,
    FlightsLoadFailed,
    Generic,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::ZhHk => self.zh_hk(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Message::HotelNotSelected => "Please select a hotel",
            Message::CheckInMissing => "Please choose a check-in date",
            Message::StayTooShort => "Stay length must be at least 1 night",
            Message::StayTooLong => "Stay length cannot exceed 365 nights",
            Message::DuplicateBooking => "You already have a booking at this hotel on that date",
            Message::LoginRequired => "Please log in first",
            Message::BookingSucceeded => "Booking confirmed!",
            Message::BookingFailed => "Booking failed, please try again later",
            Message::BookingCancelFailed => "Could not cancel the booking, please try again later",
            Message::ReviewCommentEmpty => "Please enter a comment",
            Message::ReviewRatingOutOfRange => "Rating must be between 1 and 5",
            Message::ReviewSubmitted => "Thanks for your review!",
            Message::ReviewFailed => "Could not post the review, please try again later",
            Message::ReviewDeleteFailed => "Could not delete the review, please try again later",
            Message::ReviewsLoadFailed => "Failed to load reviews",
            Message::SearchCityMissing => "Please enter a city",
            Message::SearchDatesMissing => "Please choose check-in and check-out dates",
            Message::CheckOutNotAfterCheckIn => "Check-out must be later than check-in",
            Message::FavoriteFailed => "Could not update favorites, please try again",
            Message::LoginFailed => "Login failed",
            Message::RegisterFailed => "Registration failed",
            Message::ProfileUpdateFailed => "Update failed",
            Message::AvatarUploadFailed => "Upload failed",
            Message::AvatarMissing => "Please choose an image first",
            Message::HotelLoadFailed => "Failed to load hotel data",
            Message::HotelNotFound => "Hotel not found",
            Message::NoFavorites => "You haven't saved any hotels yet!",
            Message::FlightsLoadFailed => "Failed to load flights",
            Message::Generic => "Something went wrong, please try again later",
        }
    }

    fn zh_hk(self) -> &'static str {
        match self {
            Message::HotelNotSelected => "請選擇酒店",
            Message::CheckInMissing => "請選擇入住日期",
            Message::StayTooShort => "入住天數必須大於 0",
            Message::StayTooLong => "入住天數不可超過 365 晚",
            Message::DuplicateBooking => "你已預約此酒店於該日期",
            Message::LoginRequired => "請先登入",
            Message::BookingSucceeded => "預約成功！",
            Message::BookingFailed => "預約失敗，請稍後再試",
            Message::BookingCancelFailed => "取消預約失敗，請稍後再試",
            Message::ReviewCommentEmpty => "請輸入留言內容",
            Message::ReviewRatingOutOfRange => "評分必須介乎 1 至 5",
            Message::ReviewSubmitted => "留言成功！謝謝你的評論",
            Message::ReviewFailed => "留言失敗，請稍後再試",
            Message::ReviewDeleteFailed => "刪除失敗，請稍後再試",
            Message::ReviewsLoadFailed => "載入評論失敗",
            Message::SearchCityMissing => "請輸入城市名稱",
            Message::SearchDatesMissing => "請選擇入住及退房日期",
            Message::CheckOutNotAfterCheckIn => "退房日期必須晚於入住日期",
            Message::FavoriteFailed => "收藏更新失敗，請再試",
            Message::LoginFailed => "登入失敗",
            Message::RegisterFailed => "註冊失敗",
            Message::ProfileUpdateFailed => "更新失敗",
            Message::AvatarUploadFailed => "上傳失敗",
            Message::AvatarMissing => "請先選擇圖片",
            Message::HotelLoadFailed => "載入酒店資料失敗",
            Message::HotelNotFound => "找不到酒店資料",
            Message::NoFavorites => "你還未收藏任何酒店！",
            Message::FlightsLoadFailed => "載入航班資料失敗",
            Message::Generic => "發生錯誤，請稍後再試",
        }
    }
}
