pub type Decibel = f64;
pub type Dbm = f64;
pub type Gigahertz = f64;
pub type Hertz = f64;
pub type Mbps = u32;
pub type Megahertz = u32;
pub type Meter = f64;
pub type MeterPerSecond = f64;
pub type Millisecond = u64;
pub type Milliwatt = u32;
pub type Percent = u32;
pub type Tick = u64;


pub const SPEED_OF_LIGHT: MeterPerSecond = 3e8;


#[must_use]
pub fn megahertz_to_gigahertz(frequency: Megahertz) -> Gigahertz {
    f64::from(frequency) / 1_000.0
}

#[must_use]
pub fn megahertz_to_hertz(frequency: Megahertz) -> Hertz {
    f64::from(frequency) * 1_000_000.0
}
