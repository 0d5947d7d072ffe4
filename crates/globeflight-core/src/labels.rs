//! Localized display names for locations.

use crate::enums::{Locale, LocationId};

pub fn label(id: LocationId, locale: Locale) -> &'static str {
    match locale {
        Locale::English => english(id),
        Locale::Korean => korean(id),
    }
}

fn english(id: LocationId) -> &'static str {
    match id {
        LocationId::Korea => "South Korea",
        LocationId::UnitedStates => "United States of America",
        LocationId::Japan => "Japan",
        LocationId::Australia => "Australia",
        LocationId::China => "China",
        LocationId::Philippines => "Philippines",
        LocationId::Laos => "Laos",
        LocationId::UnitedKingdom => "United Kingdom",
        LocationId::France => "France",
        LocationId::Italy => "Italy",
        LocationId::Switzerland => "Switzerland",
        LocationId::Germany => "Germany",
        LocationId::Egypt => "Egypt",
    }
}

fn korean(id: LocationId) -> &'static str {
    match id {
        LocationId::Korea => "대한민국",
        LocationId::UnitedStates => "미국",
        LocationId::Japan => "일본",
        LocationId::Australia => "호주",
        LocationId::China => "중국",
        LocationId::Philippines => "필리핀",
        LocationId::Laos => "라오스",
        LocationId::UnitedKingdom => "영국",
        LocationId::France => "프랑스",
        LocationId::Italy => "이탈리아",
        LocationId::Switzerland => "스위스",
        LocationId::Germany => "독일",
        LocationId::Egypt => "이집트",
    }
}
