//! Closed enumerations offered by the form's select inputs
//!
//! Values travel as their display labels (`"Fort Lauderdale"`, `"Med Spa"`,
//! `"10:00 AM"`), both on the wire and in [`FormSnapshot`](crate::FormSnapshot).

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $label]
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == s)
                    .ok_or_else(|| FormError::NotInCatalog {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

catalog_enum! {
    /// Cities with a clinic location
    City, "city" {
        Tampa => "Tampa",
        Orlando => "Orlando",
        Miami => "Miami",
        FortLauderdale => "Fort Lauderdale",
    }
}

catalog_enum! {
    /// Service categories
    ServiceType, "service type" {
        Chiropractic => "Chiropractic",
        MedSpa => "Med Spa",
    }
}

catalog_enum! {
    /// Specific services, grouped by [`ServiceType`]
    SubService, "sub-service" {
        InitialConsultation => "Initial Consultation",
        Adjustment => "Adjustment",
        MassageTherapy => "Massage Therapy",
        Rehabilitation => "Rehabilitation",
        Botox => "Botox",
        Fillers => "Fillers",
        LaserTreatment => "Laser Treatment",
        Facials => "Facials",
    }
}

catalog_enum! {
    /// Appointment time slots
    TimeSlot, "time slot" {
        NineAm => "9:00 AM",
        TenAm => "10:00 AM",
        ElevenAm => "11:00 AM",
        Noon => "12:00 PM",
        OnePm => "1:00 PM",
        TwoPm => "2:00 PM",
        ThreePm => "3:00 PM",
        FourPm => "4:00 PM",
        FivePm => "5:00 PM",
    }
}

impl ServiceType {
    /// Sub-services offered under this service type
    #[must_use]
    pub fn sub_services(&self) -> &'static [SubService] {
        match self {
            ServiceType::Chiropractic => &[
                SubService::InitialConsultation,
                SubService::Adjustment,
                SubService::MassageTherapy,
                SubService::Rehabilitation,
            ],
            ServiceType::MedSpa => &[
                SubService::Botox,
                SubService::Fillers,
                SubService::LaserTreatment,
                SubService::Facials,
            ],
        }
    }
}

impl SubService {
    /// Service type this sub-service belongs to
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        match self {
            SubService::InitialConsultation
            | SubService::Adjustment
            | SubService::MassageTherapy
            | SubService::Rehabilitation => ServiceType::Chiropractic,
            SubService::Botox
            | SubService::Fillers
            | SubService::LaserTreatment
            | SubService::Facials => ServiceType::MedSpa,
        }
    }
}
