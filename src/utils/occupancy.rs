use std::fmt;

/// Colour band of an occupancy percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NivelOcupacion {
    /// 0–60 %
    Verde,
    /// above 60 % up to 80 %
    Amarillo,
    /// above 80 %
    Rojo,
}

impl NivelOcupacion {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            NivelOcupacion::Rojo
        } else if percent > 60.0 {
            NivelOcupacion::Amarillo
        } else {
            NivelOcupacion::Verde
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NivelOcupacion::Verde => "verde",
            NivelOcupacion::Amarillo => "amarillo",
            NivelOcupacion::Rojo => "rojo",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            NivelOcupacion::Verde => "🟢",
            NivelOcupacion::Amarillo => "🟡",
            NivelOcupacion::Rojo => "🔴",
        }
    }
}

impl fmt::Display for NivelOcupacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display-only fill level of a container. Capacity is never enforced here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupancy {
    pub objetos: usize,
    pub capacidad: u32,
    /// min(100, 100·objetos/capacidad), 0 when capacity is 0
    pub percent: f64,
}

impl Occupancy {
    pub fn new(objetos: usize, capacidad: u32) -> Self {
        Self {
            objetos,
            capacidad,
            percent: occupancy_percent(objetos, capacidad),
        }
    }

    pub fn nivel(&self) -> NivelOcupacion {
        NivelOcupacion::from_percent(self.percent)
    }

    /// Percentage as shown on badges
    pub fn rounded(&self) -> u32 {
        self.percent.round() as u32
    }

    pub fn disponible(&self) -> i64 {
        i64::from(self.capacidad) - self.objetos as i64
    }

    pub fn esta_lleno(&self) -> bool {
        self.capacidad > 0 && self.objetos >= self.capacidad as usize
    }

    /// Fixed-width text progress bar
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}%)",
            self.objetos,
            self.capacidad,
            self.rounded()
        )
    }
}

pub fn occupancy_percent(objetos: usize, capacidad: u32) -> f64 {
    if capacidad == 0 {
        return 0.0;
    }
    (objetos as f64 / f64::from(capacidad) * 100.0).clamp(0.0, 100.0)
}
