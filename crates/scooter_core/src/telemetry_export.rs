//! Parquet export of simulation telemetry for offline analysis.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt32Array, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::telemetry::{MetricsLog, SimSnapshots};

const AGENT_SCOOTER: u8 = 0;
const AGENT_TRUCK: u8 = 1;

const SCOOTER_PARKED: u8 = 0;
const SCOOTER_RIDING: u8 = 1;

/// Site index 0 is the hub; station `i` exports as `i + 1`.
const SITE_HUB: u32 = 0;

/// One row per turn, columns in the stable metrics order.
pub fn write_metrics_parquet<P: AsRef<Path>>(
    path: P,
    log: &MetricsLog,
) -> Result<(), Box<dyn Error>> {
    let mut turn = Vec::with_capacity(log.rows.len());
    let mut avg_wait_time = Vec::with_capacity(log.rows.len());
    let mut customers_dropped = Vec::with_capacity(log.rows.len());
    let mut under_utilization = Vec::with_capacity(log.rows.len());
    let mut truck_utilization = Vec::with_capacity(log.rows.len());

    for row in &log.rows {
        turn.push(row.turn);
        avg_wait_time.push(row.avg_wait_time);
        customers_dropped.push(row.customers_dropped);
        under_utilization.push(row.under_utilization);
        truck_utilization.push(row.truck_utilization);
    }

    let schema = Schema::new(vec![
        Field::new("turn", DataType::UInt64, false),
        Field::new("avg_wait_time", DataType::Float64, false),
        Field::new("customers_dropped", DataType::UInt64, false),
        Field::new("under_utilization", DataType::Float64, false),
        Field::new("truck_utilization", DataType::Float64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(turn)),
        Arc::new(Float64Array::from(avg_wait_time)),
        Arc::new(UInt64Array::from(customers_dropped)),
        Arc::new(Float64Array::from(under_utilization)),
        Arc::new(Float64Array::from(truck_utilization)),
    ];

    write_record_batch(path, schema, arrays)
}

/// Long-format inventory levels: one row per site per captured turn.
pub fn write_site_levels_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &SimSnapshots,
) -> Result<(), Box<dyn Error>> {
    let mut turn = Vec::new();
    let mut site = Vec::new();
    let mut level = Vec::new();

    for snapshot in &snapshots.snapshots {
        turn.push(snapshot.turn);
        site.push(SITE_HUB);
        level.push(snapshot.hub_level);
        for (index, &station_level) in snapshot.station_levels.iter().enumerate() {
            turn.push(snapshot.turn);
            site.push(index as u32 + 1);
            level.push(station_level);
        }
    }

    let schema = Schema::new(vec![
        Field::new("turn", DataType::UInt64, false),
        Field::new("site", DataType::UInt32, false),
        Field::new("level", DataType::UInt32, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(turn)),
        Arc::new(UInt32Array::from(site)),
        Arc::new(UInt32Array::from(level)),
    ];

    write_record_batch(path, schema, arrays)
}

/// Agent positions across all captured turns: scooters with a parked/riding
/// state code, trucks with their cargo.
pub fn write_agent_positions_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &SimSnapshots,
) -> Result<(), Box<dyn Error>> {
    let mut turn = Vec::new();
    let mut entity = Vec::new();
    let mut agent_type = Vec::new();
    let mut state = Vec::new();
    let mut node = Vec::new();

    for snapshot in &snapshots.snapshots {
        for scooter in &snapshot.scooters {
            turn.push(snapshot.turn);
            entity.push(scooter.entity.to_bits());
            agent_type.push(AGENT_SCOOTER);
            state.push(if scooter.riding {
                SCOOTER_RIDING
            } else {
                SCOOTER_PARKED
            });
            node.push(scooter.node.0);
        }
        for truck in &snapshot.trucks {
            turn.push(snapshot.turn);
            entity.push(truck.entity.to_bits());
            agent_type.push(AGENT_TRUCK);
            state.push(truck.cargo as u8);
            node.push(truck.node.0);
        }
    }

    let schema = Schema::new(vec![
        Field::new("turn", DataType::UInt64, false),
        Field::new("entity", DataType::UInt64, false),
        Field::new("agent_type", DataType::UInt8, false),
        Field::new("state", DataType::UInt8, false),
        Field::new("node", DataType::UInt64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(turn)),
        Arc::new(UInt64Array::from(entity)),
        Arc::new(UInt8Array::from(agent_type)),
        Arc::new(UInt8Array::from(state)),
        Arc::new(UInt64Array::from(node)),
    ];

    write_record_batch(path, schema, arrays)
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
