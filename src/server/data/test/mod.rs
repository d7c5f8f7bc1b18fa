mod giveaway;
mod giveaway_settings;
