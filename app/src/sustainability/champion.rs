use serde::Serialize;

use super::Hotel;

/// Staff member guests can talk to about the sustainability programme of a hotel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreenChampion {
    pub name: &'static str,
    pub role: &'static str,
    //file name below the champions image directory
    pub photo: &'static str,
}

impl GreenChampion {
    const FRONT_OFFICE_MANAGER: &'static str = "Front Office Manager";

    pub fn of(hotel: &Hotel) -> Option<Self> {
        let (name, photo) = match hotel.name() {
            "Camden" => ("Chinmay", "chinmay.jpg"),
            "Canopy" => ("Lucyna", "lucyna.jpg"),
            "Westin" => ("Jekaterina & Gayatri", "westin.jpg"),
            "St Albans" => ("Suleman", "suleman.jpg"),
            "CIV" => ("Sufyan", "sufyan.jpg"),
            "CIE" => ("Asina", "asina.jpg"),
            "EH" => ("Roxana", "roxana.jpg"),
            _ => return None,
        };

        Some(Self {
            name,
            role: Self::FRONT_OFFICE_MANAGER,
            photo,
        })
    }
}
