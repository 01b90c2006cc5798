// OSM building categories
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Building category as tagged by OpenStreetMap's `building=*` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Apartments,
    Bakehouse,
    Barn,
    Bridge,
    Bungalow,
    Bunker,
    Cathedral,
    Cabin,
    Carport,
    Cemetery,
    Chapel,
    Church,
    Civic,
    Commercial,
    Conservatory,
    Construction,
    Cowshed,
    Detached,
    Digester,
    Dormitory,
    Farm,
    FarmAuxiliary,
    Garage,
    Garages,
    GarbageShed,
    Grandstand,
    Greenhouse,
    Hangar,
    Hospital,
    Hotel,
    House,
    Houseboat,
    Hut,
    Industrial,
    Kindergarten,
    Kiosk,
    Mosque,
    Office,
    Parking,
    Pavilion,
    Public,
    Residential,
    Retail,
    RidingHall,
    Roof,
    Ruins,
    School,
    Service,
    Shed,
    Shrine,
    Stable,
    Stadium,
    StaticCaravan,
    Sty,
    Synagogue,
    Temple,
    Terrace,
    TrainStation,
    TransformerTower,
    Transportation,
    University,
    Warehouse,
    WaterTower,
}

impl BuildingType {
    pub const ALL: [BuildingType; 63] = [
        BuildingType::Apartments,
        BuildingType::Bakehouse,
        BuildingType::Barn,
        BuildingType::Bridge,
        BuildingType::Bungalow,
        BuildingType::Bunker,
        BuildingType::Cathedral,
        BuildingType::Cabin,
        BuildingType::Carport,
        BuildingType::Cemetery,
        BuildingType::Chapel,
        BuildingType::Church,
        BuildingType::Civic,
        BuildingType::Commercial,
        BuildingType::Conservatory,
        BuildingType::Construction,
        BuildingType::Cowshed,
        BuildingType::Detached,
        BuildingType::Digester,
        BuildingType::Dormitory,
        BuildingType::Farm,
        BuildingType::FarmAuxiliary,
        BuildingType::Garage,
        BuildingType::Garages,
        BuildingType::GarbageShed,
        BuildingType::Grandstand,
        BuildingType::Greenhouse,
        BuildingType::Hangar,
        BuildingType::Hospital,
        BuildingType::Hotel,
        BuildingType::House,
        BuildingType::Houseboat,
        BuildingType::Hut,
        BuildingType::Industrial,
        BuildingType::Kindergarten,
        BuildingType::Kiosk,
        BuildingType::Mosque,
        BuildingType::Office,
        BuildingType::Parking,
        BuildingType::Pavilion,
        BuildingType::Public,
        BuildingType::Residential,
        BuildingType::Retail,
        BuildingType::RidingHall,
        BuildingType::Roof,
        BuildingType::Ruins,
        BuildingType::School,
        BuildingType::Service,
        BuildingType::Shed,
        BuildingType::Shrine,
        BuildingType::Stable,
        BuildingType::Stadium,
        BuildingType::StaticCaravan,
        BuildingType::Sty,
        BuildingType::Synagogue,
        BuildingType::Temple,
        BuildingType::Terrace,
        BuildingType::TrainStation,
        BuildingType::TransformerTower,
        BuildingType::Transportation,
        BuildingType::University,
        BuildingType::Warehouse,
        BuildingType::WaterTower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Apartments => "apartments",
            BuildingType::Bakehouse => "bakehouse",
            BuildingType::Barn => "barn",
            BuildingType::Bridge => "bridge",
            BuildingType::Bungalow => "bungalow",
            BuildingType::Bunker => "bunker",
            BuildingType::Cathedral => "cathedral",
            BuildingType::Cabin => "cabin",
            BuildingType::Carport => "carport",
            BuildingType::Cemetery => "cemetery",
            BuildingType::Chapel => "chapel",
            BuildingType::Church => "church",
            BuildingType::Civic => "civic",
            BuildingType::Commercial => "commercial",
            BuildingType::Conservatory => "conservatory",
            BuildingType::Construction => "construction",
            BuildingType::Cowshed => "cowshed",
            BuildingType::Detached => "detached",
            BuildingType::Digester => "digester",
            BuildingType::Dormitory => "dormitory",
            BuildingType::Farm => "farm",
            BuildingType::FarmAuxiliary => "farm_auxiliary",
            BuildingType::Garage => "garage",
            BuildingType::Garages => "garages",
            BuildingType::GarbageShed => "garbage_shed",
            BuildingType::Grandstand => "grandstand",
            BuildingType::Greenhouse => "greenhouse",
            BuildingType::Hangar => "hangar",
            BuildingType::Hospital => "hospital",
            BuildingType::Hotel => "hotel",
            BuildingType::House => "house",
            BuildingType::Houseboat => "houseboat",
            BuildingType::Hut => "hut",
            BuildingType::Industrial => "industrial",
            BuildingType::Kindergarten => "kindergarten",
            BuildingType::Kiosk => "kiosk",
            BuildingType::Mosque => "mosque",
            BuildingType::Office => "office",
            BuildingType::Parking => "parking",
            BuildingType::Pavilion => "pavilion",
            BuildingType::Public => "public",
            BuildingType::Residential => "residential",
            BuildingType::Retail => "retail",
            BuildingType::RidingHall => "riding_hall",
            BuildingType::Roof => "roof",
            BuildingType::Ruins => "ruins",
            BuildingType::School => "school",
            BuildingType::Service => "service",
            BuildingType::Shed => "shed",
            BuildingType::Shrine => "shrine",
            BuildingType::Stable => "stable",
            BuildingType::Stadium => "stadium",
            BuildingType::StaticCaravan => "static_caravan",
            BuildingType::Sty => "sty",
            BuildingType::Synagogue => "synagogue",
            BuildingType::Temple => "temple",
            BuildingType::Terrace => "terrace",
            BuildingType::TrainStation => "train_station",
            BuildingType::TransformerTower => "transformer_tower",
            BuildingType::Transportation => "transportation",
            BuildingType::University => "university",
            BuildingType::Warehouse => "warehouse",
            BuildingType::WaterTower => "water_tower",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuildingType(pub String);

impl fmt::Display for UnknownBuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown building type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBuildingType {}

impl FromStr for BuildingType {
    type Err = UnknownBuildingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| UnknownBuildingType(s.to_string()))
    }
}
