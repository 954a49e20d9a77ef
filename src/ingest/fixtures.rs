/// Test fixtures: representative JSON payloads from the ViVa station API.
///
/// Trimmed to the fields the parser reads plus a few it ignores, so that
/// unknown keys are known to be tolerated.
///
/// Station list shape:
///   GetStationsResult.Stations[]
///     .ID, .Lat, .Lon, .Name
///
/// Single station shape:
///   GetSingleStationResult.Samples[]
///     .StationID, .Name, .Value (STRING), .Unit, .Quality,
///     .Updated, .Trend, .Type, .Heading, .Calm, .Msg,
///     .WaterLevelOffset, .WaterLevelReference
///
/// Note: sample values are JSON strings and are not always numeric.

/// Four stations, two of which contain "göteborg" in some casing.
pub fn fixture_stations_json() -> &'static str {
    r#"{
      "GetStationsResult": {
        "Felmeddelande": null,
        "Stations": [
          { "ID": 114, "Lat": 57.6847, "Lon": 11.7906,
            "Name": "Göteborg - Torshamnen", "Type": 0 },
          { "ID": 115, "Lat": 57.7089, "Lon": 11.9425,
            "Name": "GÖTEBORG - Lilla Bommen", "Type": 0 },
          { "ID": 92,  "Lat": 55.6050, "Lon": 12.9989, "Name": "Malmö hamn", "Type": 0 },
          { "ID": 1,   "Lat": 59.3233, "Lon": 18.0811, "Name": "Stockholm", "Type": 0 }
        ]
      }
    }"#
}

/// Torshamnen: water level, wind and water temperature.
pub fn fixture_samples_json() -> &'static str {
    r#"{
      "GetSingleStationResult": {
        "ID": 114,
        "Name": "Göteborg - Torshamnen",
        "Samples": [
          {
            "Calm": 0, "Heading": 0, "Msg": "", "Name": "Vattenstånd", "Quality": "Ok",
            "StationID": 114, "Trend": "Falling", "Type": "level", "Unit": "cm",
            "Updated": "2024-05-01 12:00:00", "Value": "-12",
            "WaterLevelOffset": 0.0, "WaterLevelReference": "MW"
          },
          {
            "Calm": 0, "Heading": 245, "Msg": "", "Name": "Medelvind", "Quality": "Ok",
            "StationID": 114, "Trend": "", "Type": "wind", "Unit": "m/s",
            "Updated": "2024-05-01 12:00:00", "Value": "7.4",
            "WaterLevelOffset": 0.0, "WaterLevelReference": ""
          },
          {
            "Calm": 0, "Heading": 0, "Msg": "", "Name": "Vattentemp", "Quality": "Ok",
            "StationID": 114, "Trend": "", "Type": "temp", "Unit": "°C",
            "Updated": "2024-05-01 11:50:00", "Value": "9.8",
            "WaterLevelOffset": 0.0, "WaterLevelReference": ""
          }
        ]
      }
    }"#
}

/// Lilla Bommen: one numeric sample and one sensor reporting "-" (outage).
pub fn fixture_non_numeric_sample_json() -> &'static str {
    r#"{
      "GetSingleStationResult": {
        "Samples": [
          {
            "Name": "Vattenstånd", "Quality": "Ok", "StationID": 115,
            "Trend": "Rising", "Unit": "cm", "Updated": "2024-05-01 12:00:00", "Value": "4"
          },
          {
            "Name": "Byvind", "Quality": "Bad", "StationID": 115,
            "Trend": "", "Unit": "m/s", "Updated": "2024-05-01 08:10:00", "Value": "-"
          }
        ]
      }
    }"#
}

/// Smögen: the API publishes `null` for fields a sensor does not use.
pub fn fixture_null_fields_json() -> &'static str {
    r#"{
      "GetSingleStationResult": {
        "Felmeddelande": null,
        "Samples": [
          {
            "Calm": null, "Heading": null, "Msg": null, "Name": "Vattenstånd", "Quality": "Ok",
            "StationID": 3, "Trend": "Falling", "Type": "level", "Unit": "cm",
            "Updated": "2024-05-01 12:00:00", "Value": "-8",
            "WaterLevelOffset": null, "WaterLevelReference": null
          },
          {
            "Calm": 0, "Heading": null, "Msg": null, "Name": "Medelvind", "Quality": null,
            "StationID": 3, "Trend": null, "Type": "wind", "Unit": "m/s",
            "Updated": null, "Value": null,
            "WaterLevelOffset": 0.0, "WaterLevelReference": null
          }
        ]
      }
    }"#
}
