use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The eleven profile tiers, in ladder order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileType {
    #[serde(rename = "Rookie Voyeur")]
    RookieVoyeur,
    #[serde(rename = "Late-Night Scroller")]
    LateNightScroller,
    #[serde(rename = "Naughty Subscriber")]
    NaughtySubscriber,
    #[serde(rename = "Private Teaser")]
    PrivateTeaser,
    #[serde(rename = "Erotic Enthusiast")]
    EroticEnthusiast,
    #[serde(rename = "XXX VIP")]
    XxxVip,
    #[serde(rename = "Hardcore Legend")]
    HardcoreLegend,
    #[serde(rename = "Kink Master")]
    KinkMaster,
    #[serde(rename = "Adult Insider")]
    AdultInsider,
    #[serde(rename = "Exclusive Pleasure-Seeker")]
    ExclusivePleasureSeeker,
    #[serde(rename = "FIPT Legend")]
    FiptLegend,
}

/// Static per-tier configuration applied to a profile whenever it
/// enters the tier.
#[derive(Debug, Clone, Copy)]
pub struct TierSpec {
    pub profile_type: ProfileType,
    pub image: &'static str,
    pub coin_level: i64,
    pub earn_per_tab: i32,
    pub profit_per_hour: f64,
}

pub const TIERS: [TierSpec; 11] = [
    TierSpec {
        profile_type: ProfileType::RookieVoyeur,
        image: "profile_type/first.png",
        coin_level: 5_000,
        earn_per_tab: 3,
        profit_per_hour: 0.5,
    },
    TierSpec {
        profile_type: ProfileType::LateNightScroller,
        image: "profile_type/second.png",
        coin_level: 25_000,
        earn_per_tab: 4,
        profit_per_hour: 1.0,
    },
    TierSpec {
        profile_type: ProfileType::NaughtySubscriber,
        image: "profile_type/third.png",
        coin_level: 100_000,
        earn_per_tab: 5,
        profit_per_hour: 2.0,
    },
    TierSpec {
        profile_type: ProfileType::PrivateTeaser,
        image: "profile_type/fourth.png",
        coin_level: 250_000,
        earn_per_tab: 6,
        profit_per_hour: 3.5,
    },
    TierSpec {
        profile_type: ProfileType::EroticEnthusiast,
        image: "profile_type/fifth.png",
        coin_level: 500_000,
        earn_per_tab: 8,
        profit_per_hour: 5.0,
    },
    TierSpec {
        profile_type: ProfileType::XxxVip,
        image: "profile_type/sixth.png",
        coin_level: 1_000_000,
        earn_per_tab: 10,
        profit_per_hour: 8.0,
    },
    TierSpec {
        profile_type: ProfileType::HardcoreLegend,
        image: "profile_type/seventh.png",
        coin_level: 2_500_000,
        earn_per_tab: 12,
        profit_per_hour: 12.0,
    },
    TierSpec {
        profile_type: ProfileType::KinkMaster,
        image: "profile_type/eighth.png",
        coin_level: 5_000_000,
        earn_per_tab: 14,
        profit_per_hour: 18.0,
    },
    TierSpec {
        profile_type: ProfileType::AdultInsider,
        image: "profile_type/ninth.png",
        coin_level: 10_000_000,
        earn_per_tab: 16,
        profit_per_hour: 25.0,
    },
    TierSpec {
        profile_type: ProfileType::ExclusivePleasureSeeker,
        image: "profile_type/tenth.png",
        coin_level: 25_000_000,
        earn_per_tab: 18,
        profit_per_hour: 40.0,
    },
    TierSpec {
        profile_type: ProfileType::FiptLegend,
        image: "profile_type/eleventh.png",
        coin_level: 50_000_000,
        earn_per_tab: 20,
        profit_per_hour: 60.0,
    },
];

impl ProfileType {
    pub const ALL: [ProfileType; 11] = [
        ProfileType::RookieVoyeur,
        ProfileType::LateNightScroller,
        ProfileType::NaughtySubscriber,
        ProfileType::PrivateTeaser,
        ProfileType::EroticEnthusiast,
        ProfileType::XxxVip,
        ProfileType::HardcoreLegend,
        ProfileType::KinkMaster,
        ProfileType::AdultInsider,
        ProfileType::ExclusivePleasureSeeker,
        ProfileType::FiptLegend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::RookieVoyeur => "Rookie Voyeur",
            ProfileType::LateNightScroller => "Late-Night Scroller",
            ProfileType::NaughtySubscriber => "Naughty Subscriber",
            ProfileType::PrivateTeaser => "Private Teaser",
            ProfileType::EroticEnthusiast => "Erotic Enthusiast",
            ProfileType::XxxVip => "XXX VIP",
            ProfileType::HardcoreLegend => "Hardcore Legend",
            ProfileType::KinkMaster => "Kink Master",
            ProfileType::AdultInsider => "Adult Insider",
            ProfileType::ExclusivePleasureSeeker => "Exclusive Pleasure-Seeker",
            ProfileType::FiptLegend => "FIPT Legend",
        }
    }

    pub fn parse(value: &str) -> Option<ProfileType> {
        ProfileType::ALL.iter().copied().find(|t| t.as_str() == value)
    }

    /// Position on the ladder, 0-based.
    pub fn index(&self) -> usize {
        ProfileType::ALL
            .iter()
            .position(|t| t == self)
            .expect("tier is present in the ladder")
    }

    pub fn spec(&self) -> &'static TierSpec {
        &TIERS[self.index()]
    }

    /// The tier above this one, `None` at the top of the ladder.
    pub fn next(&self) -> Option<ProfileType> {
        ProfileType::ALL.get(self.index() + 1).copied()
    }
}

impl Default for ProfileType {
    fn default() -> Self {
        ProfileType::RookieVoyeur
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub uuid: Uuid,
    pub user_id: i64,
    pub profile_type: String,
    pub coin: Decimal,
    pub coin_level: i64,
    pub earn_per_tab: i32,
    pub profit_per_hour: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn tier(&self) -> ProfileType {
        ProfileType::parse(&self.profile_type).unwrap_or_default()
    }
}
