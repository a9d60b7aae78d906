use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const KILOMETERS_PER_MILE: Decimal = dec!(1.609344);
const LITERS_PER_US_GALLON: Decimal = dec!(3.785411784);
const LITERS_PER_UK_GALLON: Decimal = dec!(4.54609);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometer,
    StatuteMile,
}

impl DistanceUnit {
    fn kilometers_per_unit(self) -> Decimal {
        match self {
            DistanceUnit::Kilometer => Decimal::ONE,
            DistanceUnit::StatuteMile => KILOMETERS_PER_MILE,
        }
    }

    /// Convert a distance in kilometers into this unit.
    pub fn from_kilometers(self, km: Decimal) -> Decimal {
        km / self.kilometers_per_unit()
    }

    /// Convert a distance in this unit into kilometers.
    pub fn to_kilometers(self, value: Decimal) -> Decimal {
        value * self.kilometers_per_unit()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Kilometer => "km",
            DistanceUnit::StatuteMile => "mi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    #[default]
    Liter,
    GallonUs,
    GallonUk,
}

impl VolumeUnit {
    fn liters_per_unit(self) -> Decimal {
        match self {
            VolumeUnit::Liter => Decimal::ONE,
            VolumeUnit::GallonUs => LITERS_PER_US_GALLON,
            VolumeUnit::GallonUk => LITERS_PER_UK_GALLON,
        }
    }

    pub fn from_liters(self, liters: Decimal) -> Decimal {
        liters / self.liters_per_unit()
    }

    pub fn to_liters(self, value: Decimal) -> Decimal {
        value * self.liters_per_unit()
    }

    /// Re-express a price per liter as a price per unit of this volume.
    pub fn price_per_unit(self, price_per_liter: Decimal) -> Decimal {
        price_per_liter * self.liters_per_unit()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "l",
            VolumeUnit::GallonUs | VolumeUnit::GallonUk => "gal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionUnit {
    #[default]
    LitersPer100Km,
    KilometersPerLiter,
    MilesPerGallonUs,
    MilesPerGallonUk,
}

impl ConsumptionUnit {
    /// Efficiency units grow with better mileage; consumption units shrink.
    pub fn is_efficiency(self) -> bool {
        !matches!(self, ConsumptionUnit::LitersPer100Km)
    }

    /// Consumption for driving `km` kilometers on `liters` liters.
    ///
    /// Returns zero when either quantity is not positive.
    pub fn consumption(self, km: Decimal, liters: Decimal) -> Decimal {
        if km <= Decimal::ZERO || liters <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match self {
            ConsumptionUnit::LitersPer100Km => dec!(100) * liters / km,
            ConsumptionUnit::KilometersPerLiter => km / liters,
            ConsumptionUnit::MilesPerGallonUs => {
                (km / KILOMETERS_PER_MILE) / (liters / LITERS_PER_US_GALLON)
            }
            ConsumptionUnit::MilesPerGallonUk => {
                (km / KILOMETERS_PER_MILE) / (liters / LITERS_PER_UK_GALLON)
            }
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ConsumptionUnit::LitersPer100Km => "l/100km",
            ConsumptionUnit::KilometersPerLiter => "km/l",
            ConsumptionUnit::MilesPerGallonUs | ConsumptionUnit::MilesPerGallonUk => "mpg",
        }
    }
}
