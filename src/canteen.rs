use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

/// Canteens run by the Studierendenwerk Bonn that the meal plan endpoint
/// knows about, together with their numeric request ids.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Canteen {
    #[value(name = "SanktAugustin")]
    SanktAugustin,
    #[value(name = "CAMPO")]
    Campo,
    #[value(name = "Hofgarten")]
    Hofgarten,
    #[value(name = "FoodtruckRheinbach")]
    FoodtruckRheinbach,
    #[value(name = "VenusbergBistro")]
    VenusbergBistro,
    #[value(name = "CasinoZEF/ZEI")]
    CasinoZefZei,
    #[value(name = "Foodtruck")]
    Foodtruck,
    #[value(name = "Rabinstraße")]
    Rabinstrasse,
}

impl Canteen {
    /// Value of the `canteen` form field in the meal plan request.
    pub const fn request_id(self) -> &'static str {
        match self {
            Self::SanktAugustin => "1",
            Self::Campo => "2",
            Self::Hofgarten => "3",
            Self::FoodtruckRheinbach => "5",
            Self::VenusbergBistro => "6",
            Self::CasinoZefZei => "8",
            Self::Foodtruck => "19",
            Self::Rabinstrasse => "21",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SanktAugustin => "SanktAugustin",
            Self::Campo => "CAMPO",
            Self::Hofgarten => "Hofgarten",
            Self::FoodtruckRheinbach => "FoodtruckRheinbach",
            Self::VenusbergBistro => "VenusbergBistro",
            Self::CasinoZefZei => "CasinoZEF/ZEI",
            Self::Foodtruck => "Foodtruck",
            Self::Rabinstrasse => "Rabinstraße",
        }
    }
}

impl Display for Canteen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
